use cropscan_jni::*;

fn make_test_frame(width: u32, height: u32, dots: &[(u32, u32)]) -> Vec<u8> {
    use image::{Rgba, RgbaImage};

    let mut img = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]));
    for &(x, y) in dots {
        img.put_pixel(x, y, Rgba([30, 30, 30, 255]));
    }
    img.into_raw()
}

#[test]
fn crop_returns_record() {
    let pixels = make_test_frame(4, 3, &[(2, 1), (0, 2)]);
    let result = crop(pixels, 4, 3).unwrap();
    assert_eq!(result, vec![1, 2, 2, 0]);
}

#[test]
fn crop_of_blank_frame_is_sentinel() {
    let pixels = make_test_frame(8, 2, &[]);
    assert_eq!(crop(pixels, 8, 2).unwrap(), vec![2, 0, 0, 8]);
}

#[test]
fn scan_with_all_parameters() {
    let pixels = make_test_frame(20, 20, &[(5, 6), (9, 12)]);
    let outcome = scan(pixels, 20, 20, Framing::Inclusive, 2).unwrap();

    assert_eq!(
        outcome.bounds,
        Some(BoundingBox {
            top: 6,
            right: 9,
            bottom: 12,
            left: 5
        })
    );
    assert_eq!(
        outcome.crop,
        Some(CropRegion {
            x: 3,
            y: 4,
            width: 9,
            height: 11
        })
    );
    assert_eq!((outcome.width, outcome.height), (20, 20));
}

#[test]
fn scan_of_blank_frame_has_no_bounds() {
    let pixels = make_test_frame(5, 5, &[]);
    let outcome = scan(pixels, 5, 5, Framing::Exclusive, 0).unwrap();
    assert!(outcome.bounds.is_none());
    assert!(outcome.crop.is_none());
}

#[test]
fn short_buffer_is_reported() {
    let result = crop(vec![255; 12], 2, 2);
    assert!(matches!(
        result,
        Err(ScanError::BufferTooShort {
            expected: 16,
            actual: 12
        })
    ));
}

#[test]
fn required_pages_works() {
    assert_eq!(required_pages(595, 842).unwrap(), 31);
}
