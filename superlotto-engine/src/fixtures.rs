use rand::rngs::StdRng;
use rand::SeedableRng;

use superlotto_db::models::DrawRecord;

pub fn make_record(front: [u8; 5], back: [u8; 2]) -> DrawRecord {
    DrawRecord::new("00000", "2023-01-01", front, back)
}

/// Deux tirages, le plus récent en dernier.
pub fn scenario_history() -> Vec<DrawRecord> {
    vec![
        DrawRecord::new("23001", "2023-01-02", [1, 12, 22, 26, 33], [3, 7]),
        DrawRecord::new("23002", "2023-01-04", [2, 13, 23, 27, 34], [4, 8]),
    ]
}

/// Tirages valides pseudo-aléatoires, reproductibles.
pub fn make_test_records(n: usize) -> Vec<DrawRecord> {
    let mut rng = StdRng::seed_from_u64(7);
    (0..n)
        .map(|i| {
            let mut front = [0u8; 5];
            for (slot, idx) in front.iter_mut().zip(rand::seq::index::sample(&mut rng, 35, 5).into_iter()) {
                *slot = idx as u8 + 1;
            }
            front.sort();
            let mut back = [0u8; 2];
            for (slot, idx) in back.iter_mut().zip(rand::seq::index::sample(&mut rng, 12, 2).into_iter()) {
                *slot = idx as u8 + 1;
            }
            back.sort();
            DrawRecord::new(format!("{:05}", 23000 + i), "2023-01-01", front, back)
        })
        .collect()
}
