//! Regression test parameters and operations

use resample_core::{Axis, Coordinates, Dimensions, Image, Sample, line_starts};

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Compare computed values with expectations (default)
    #[default]
    Compare,
    /// Compare and print every compared image
    Display,
}

impl RegTestMode {
    /// Parse mode from environment variable
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// This structure tracks the state of a regression test, including
/// the test name, current index, mode, and success status.
pub struct RegParams {
    /// Name of the test (e.g., "scale")
    pub test_name: String,
    /// Current test index (incremented before each test)
    index: usize,
    /// Test mode
    pub mode: RegTestMode,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// # Arguments
    ///
    /// * `test_name` - Name of the test (e.g., "scale")
    ///
    /// # Returns
    ///
    /// A new `RegParams` instance configured based on the `REGTEST_MODE`
    /// environment variable.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn fail(&mut self, msg: String) {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }

    /// Compare two floating-point values
    ///
    /// # Arguments
    ///
    /// * `expected` - Expected value
    /// * `actual` - Actual computed value
    /// * `delta` - Maximum allowed difference
    ///
    /// # Returns
    ///
    /// `true` if values match within delta, `false` otherwise.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta || diff.is_nan() {
            let msg = format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            );
            self.fail(msg);
            false
        } else {
            true
        }
    }

    /// Compare two sets of image extents for equality
    pub fn compare_dims(&mut self, expected: Dimensions, actual: Dimensions) -> bool {
        self.index += 1;

        if expected != actual {
            let msg = format!(
                "Failure in {}_reg: dimension comparison for index {}\n\
                 expected {}, actual {}",
                self.test_name, self.index, expected, actual
            );
            self.fail(msg);
            false
        } else {
            true
        }
    }

    /// Compare two images element by element
    ///
    /// # Arguments
    ///
    /// * `expected` - Reference image
    /// * `actual` - Computed image
    /// * `delta` - Maximum allowed difference per component
    ///
    /// # Returns
    ///
    /// `true` if extents agree and every component matches within
    /// `delta`, `false` otherwise.
    pub fn compare_images<T: Sample>(
        &mut self,
        expected: &Image<T>,
        actual: &Image<T>,
        delta: f64,
    ) -> bool {
        self.index += 1;

        if self.display() {
            dump_image("expected", expected);
            dump_image("actual", actual);
        }

        if expected.dims() != actual.dims() {
            let msg = format!(
                "Failure in {}_reg: image comparison for index {} - dimension mismatch\n\
                 expected {}, actual {}",
                self.test_name,
                self.index,
                expected.dims(),
                actual.dims()
            );
            self.fail(msg);
            return false;
        }

        let dims = expected.dims();
        for (i, (e, a)) in expected.data().iter().zip(actual.data()).enumerate() {
            for k in 0..T::COMPONENTS {
                let diff = (e.component(k) - a.component(k)).abs();
                if diff > delta || diff.is_nan() {
                    let msg = format!(
                        "Failure in {}_reg: image comparison for index {} - mismatch at {} \
                         component {}: expected {}, actual {}",
                        self.test_name,
                        self.index,
                        coordinates_of(dims, i),
                        k,
                        e.component(k),
                        a.component(k)
                    );
                    self.fail(msg);
                    return false;
                }
            }
        }

        true
    }

    /// Clean up and report results
    ///
    /// # Returns
    ///
    /// `true` if all tests passed, `false` if any failed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all tests have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

fn coordinates_of(dims: Dimensions, mut i: usize) -> Coordinates {
    let mut coords = Coordinates::default();
    for axis in Axis::ALL {
        let n = dims.get(axis);
        coords.set(axis, i % n);
        i /= n;
    }
    coords
}

fn dump_image<T: Sample>(label: &str, image: &Image<T>) {
    let dims = image.dims();
    eprintln!("{} {} {}", label, image.type_name(), dims);
    let mut row = vec![0.0; dims.x];
    for start in line_starts(dims, Axis::X) {
        for k in 0..T::COMPONENTS {
            if image.get_line(Axis::X, &start, k, &mut row).is_ok() {
                let cells: Vec<String> = row.iter().map(|v| format!("{v:8.3}")).collect();
                eprintln!(
                    "  y={} z={} t={} c={} [{}] {}",
                    start.y,
                    start.z,
                    start.t,
                    start.c,
                    k,
                    cells.join(" ")
                );
            }
        }
    }
}
