mod rng;

pub use rng::XorShift64;

use listscan_core::layout::Detection;

/// Page of `lists` columns with `rows` words each, jittered like real scans.
pub fn list_page(seed: u64, lists: usize, rows: usize) -> Vec<Detection> {
    let mut rng = XorShift64::new(seed);
    let mut detections = Vec::with_capacity(lists * rows);
    for col in 0..lists {
        let x = 40.0 + col as f64 * 260.0;
        for row in 0..rows {
            let x0 = x + rng.gen_f64(0.0, 12.0);
            let y0 = 30.0 + row as f64 * 36.0 + rng.gen_f64(0.0, 6.0);
            let h = 16.0 + rng.gen_index(5) as f64;
            let w = rng.gen_f64(40.0, 140.0);
            detections.push(Detection::from_rect(
                x0,
                y0,
                x0 + w,
                y0 + h,
                format!("item{col}-{row}"),
                Some(0.9),
            ));
        }
    }
    detections
}
