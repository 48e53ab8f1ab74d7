//! Print the bounding box of the non-white content of image files.
//!
//! Usage:
//!   cargo run --example scan_image -- drawing.png [more.png ...]

use cropscan::{Framing, Scanner};

fn main() {
    let paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        eprintln!("usage: scan_image <image>...");
        std::process::exit(2);
    }

    for path in &paths {
        let img = match image::open(path) {
            Ok(img) => img.to_rgba8(),
            Err(e) => {
                eprintln!("{path}: {e}");
                continue;
            }
        };
        let (width, height) = img.dimensions();

        let start = std::time::Instant::now();
        let outcome = Scanner::new(img.as_raw(), width, height)
            .unwrap()
            .framing(Framing::Inclusive)
            .scan();
        let elapsed = start.elapsed();

        println!("=== {path} ({width}x{height}) ===");
        match (outcome.bounds, outcome.crop) {
            (Some(b), Some(crop)) => {
                println!(
                    "  top={} right={} bottom={} left={}",
                    b.top, b.right, b.bottom, b.left
                );
                println!(
                    "  crop: ({}, {}, {}x{})",
                    crop.x, crop.y, crop.width, crop.height
                );
            }
            _ => println!("  blank: nothing but white"),
        }
        println!("  scanned in {elapsed:?}");
    }
}
