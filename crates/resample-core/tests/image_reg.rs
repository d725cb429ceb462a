//! Image regression test
//!
//! Element conversion, line access, component handling of color images
//! and bordered float working copies.

use resample_core::{
    Axis, Borders, Color, Coordinates, Dimensions, Error, FloatImage, Image, Sample,
};
use resample_test::{RegParams, test_image};

#[test]
fn image_reg() {
    let mut rp = RegParams::new("image");

    // --- Test 1: integer types round half up and saturate ---
    let mut small = Image::<u8>::new(Dimensions::plane(4, 1)).unwrap();
    for (x, v) in [-3.0, 2.5, 254.6, 1000.0].into_iter().enumerate() {
        small.set_value(&Coordinates::new(x, 0, 0, 0, 0), 0, v).unwrap();
    }
    rp.compare_values(0.0, small.data()[0] as f64, 0.0);
    rp.compare_values(3.0, small.data()[1] as f64, 0.0);
    rp.compare_values(255.0, small.data()[2] as f64, 0.0);
    rp.compare_values(255.0, small.data()[3] as f64, 0.0);

    let mut wide = Image::<i32>::new(Dimensions::plane(2, 1)).unwrap();
    wide.fill_value(-2.5);
    rp.compare_values(-2.0, wide.data()[0] as f64, 0.0);
    let mut real = Image::<f32>::new(Dimensions::plane(2, 1)).unwrap();
    real.fill_value(-2.5);
    rp.compare_values(-2.5, real.data()[1] as f64, 0.0);

    // --- Test 2: line access ---
    let dims = Dimensions::new(3, 4, 5, 2, 2);
    let mut ramp = test_image("ramp", dims).expect("ramp");
    let mut line = vec![0.0; 4];
    ramp.get_line(Axis::Y, &Coordinates::new(2, 0, 3, 1, 1), 0, &mut line).unwrap();
    for (y, v) in line.iter().enumerate() {
        rp.compare_values((2 + 10 * y + 300 + 1000 + 10000) as f64, *v, 0.0);
    }
    let doubled: Vec<f64> = line.iter().map(|v| 2.0 * v).collect();
    ramp.set_line(Axis::Y, &Coordinates::new(2, 0, 3, 1, 1), 0, &doubled).unwrap();
    rp.compare_values(2.0 * 11332.0, ramp.value(&Coordinates::new(2, 3, 3, 1, 1), 0).unwrap(), 0.0);

    let mut too_long = vec![0.0; 5];
    let overrun = ramp.get_line(Axis::Z, &Coordinates::new(0, 0, 1, 0, 0), 0, &mut too_long);
    rp.compare_values(
        1.0,
        if matches!(overrun, Err(Error::CoordinatesOutOfBounds { .. })) { 1.0 } else { 0.0 },
        0.0,
    );

    // --- Test 3: color components are addressed independently ---
    let mut color = Image::<Color>::with_value(Dimensions::plane(3, 2), Color::new(10, 20, 30)).unwrap();
    let at = Coordinates::new(1, 1, 0, 0, 0);
    color.set_value(&at, Color::GREEN, 99.4).unwrap();
    rp.compare_values(10.0, color.value(&at, Color::RED).unwrap(), 0.0);
    rp.compare_values(99.0, color.value(&at, Color::GREEN).unwrap(), 0.0);
    rp.compare_values(30.0, color.value(&at, Color::BLUE).unwrap(), 0.0);
    rp.compare_values(10.0, color.minimum(), 0.0);
    rp.compare_values(99.0, color.maximum(), 0.0);
    rp.compare_values(3.0, Color::COMPONENTS as f64, 0.0);
    let bad = color.value(&at, 3);
    rp.compare_values(
        1.0,
        if matches!(bad, Err(Error::ComponentOutOfBounds { index: 3, count: 3 })) { 1.0 } else { 0.0 },
        0.0,
    );

    // --- Test 4: bordered working copies mirror and write back ---
    let row = Image::from_vec(Dimensions::plane(4, 2), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]).unwrap();
    let mut work = FloatImage::bordered(&row, 0, Borders::spatial(2, 1, 0)).expect("bordered");
    rp.compare_dims(Dimensions::plane(8, 4), work.dims());
    work.mirror_borders();
    // x borders reflect without repeating the edge sample
    let expected_row = [3.0, 2.0, 1.0, 2.0, 3.0, 4.0, 3.0, 2.0];
    for (x, e) in expected_row.iter().enumerate() {
        rp.compare_values(*e, work.at(x, 1, 0, 0, 0), 0.0);
    }
    // y borders reflect whole rows, corners included
    rp.compare_values(5.0, work.at(2, 0, 0, 0, 0), 0.0);
    rp.compare_values(7.0, work.at(0, 0, 0, 0, 0), 0.0);
    rp.compare_values(1.0, work.at(2, 3, 0, 0, 0), 0.0);

    work.multiply(0.5);
    let mut halved = Image::<f64>::new(row.dims()).unwrap();
    work.write_component(&mut halved, 0).expect("write back");
    for (a, b) in row.data().iter().zip(halved.data()) {
        rp.compare_values(a * 0.5, *b, 0.0);
    }

    work.fill_borders(-1.0);
    rp.compare_values(-1.0, work.at(0, 0, 0, 0, 0), 0.0);
    rp.compare_values(-1.0, work.at(7, 2, 0, 0, 0), 0.0);
    rp.compare_values(0.5, work.at(2, 1, 0, 0, 0), 0.0);

    let mismatch = work.write_component(&mut Image::<f64>::new(Dimensions::plane(3, 2)).unwrap(), 0);
    rp.compare_values(1.0, if mismatch.is_err() { 1.0 } else { 0.0 }, 0.0);

    // --- Test 5: zero extents are rejected ---
    let empty = Image::<u16>::new(Dimensions::new(4, 0, 1, 1, 1));
    rp.compare_values(
        1.0,
        if matches!(empty, Err(Error::InvalidDimensions(_))) { 1.0 } else { 0.0 },
        0.0,
    );

    assert!(rp.cleanup(), "image regression test failed");
}
