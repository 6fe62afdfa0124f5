//! Image regression test
//!
//! Region extraction and stacking must be exact inverses: cutting an
//! image into quadrants and stacking them back gives the original.

use lodtree_core::{Image, NdArray, hstack, vstack};
use lodtree_test::{RegParams, TestImageFactory};

#[test]
fn image_reg() {
    let mut rp = RegParams::new("image");
    let mut factory = TestImageFactory::new("image");

    let source = factory.coordinates(37, 50, 3).expect("coordinates image");
    let image = &source.image;

    // --- Test 1: quadrant split and reassembly ---
    let ul = image.clip_region(0, 0, 20, 30).expect("ul");
    let ur = image.clip_region(0, 30, 20, 30).expect("ur");
    let ll = image.clip_region(20, 0, 20, 30).expect("ll");
    let lr = image.clip_region(20, 30, 20, 30).expect("lr");
    rp.compare_shapes((20, 20, 3), ur.shape());
    rp.compare_shapes((17, 30, 3), ll.shape());
    rp.compare_shapes((17, 20, 3), lr.shape());

    let top = hstack(&[&ul, &ur]).expect("top");
    let bottom = hstack(&[&ll, &lr]).expect("bottom");
    let combined = vstack(&[&top, &bottom]).expect("combined");
    rp.compare_images(image, &combined);

    // --- Test 2: array conversion keeps layout ---
    let array = NdArray::from(image.clone());
    rp.compare_values(3.0, array.ndim() as f64, 0.0);
    let back = Image::try_from(array).expect("image from array");
    rp.compare_images(image, &back);

    // --- Test 3: mismatched stack is rejected ---
    rp.check(hstack(&[&ul, &ll]).is_err(), "hstack of unequal heights");
    rp.check(vstack(&[&ul, &ur]).is_err(), "vstack of unequal widths");

    assert!(rp.cleanup(), "image regression test failed");
}
