//! Drives the engine with long random operation sequences and checks it
//! against an in-memory map after every step.

#[cfg(test)]
mod tests {

    use hashslot::{
        HashFile, InsertOutcome,
        traits::{SlotStoreReader, SlotStoreWriter},
    };
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::BTreeMap;
    use tempfile::tempdir;

    const STEPS: usize = 1_500;

    fn run_model(seed: u64, total_slots: u32, key_range: i32) {
        let dir = tempdir().unwrap();
        let path = dir.path().join(format!("model_{seed}.dat"));
        let mut storage = HashFile::create(&path, total_slots).unwrap();
        let mut model: BTreeMap<i32, String> = BTreeMap::new();
        let mut rng = StdRng::seed_from_u64(seed);

        for step in 0..STEPS {
            let key = rng.random_range(-key_range..=key_range);
            let payload = format!("v{step}");

            match rng.random_range(0..4) {
                0 => match storage.insert(key, &payload).unwrap() {
                    InsertOutcome::Inserted { slot } => {
                        assert!(slot < total_slots);
                        assert!(model.insert(key, payload).is_none(), "step {step}");
                    }
                    InsertOutcome::DuplicateKey => {
                        assert!(model.contains_key(&key), "step {step}")
                    }
                    InsertOutcome::Full => {
                        assert!(!model.contains_key(&key), "step {step}");
                        assert_eq!(model.len(), total_slots as usize, "step {step}");
                    }
                },
                1 => {
                    let updated = storage.update(key, &payload).unwrap();
                    assert_eq!(updated.is_some(), model.contains_key(&key), "step {step}");
                    if updated.is_some() {
                        model.insert(key, payload);
                    }
                }
                2 => {
                    let deleted = storage.delete(key).unwrap();
                    assert_eq!(deleted.is_some(), model.remove(&key).is_some(), "step {step}");
                }
                _ => {
                    let found = storage.search(key).unwrap().map(|r| r.payload);
                    assert_eq!(found.as_ref(), model.get(&key), "step {step}");
                }
            }

            let stats = storage.stats().unwrap();
            assert_eq!(stats.total(), total_slots, "step {step}");
            assert_eq!(stats.occupied as usize, model.len(), "step {step}");
        }

        // Final full comparison, including every slot index being distinct
        let records = storage.read_all().unwrap();
        let listed: Vec<(i32, String)> = records
            .iter()
            .map(|r| (r.key, r.payload.clone()))
            .collect();
        let expected: Vec<(i32, String)> = model.into_iter().collect();
        assert_eq!(listed, expected);

        let mut slots: Vec<u32> = records.iter().map(|r| r.slot).collect();
        slots.sort_unstable();
        slots.dedup();
        assert_eq!(slots.len(), records.len());
    }

    #[test]
    fn test_model_sparse_table() {
        run_model(1, 101, 300);
    }

    #[test]
    fn test_model_dense_table_with_heavy_collisions() {
        // Few slots and a narrow key range keep the table near full and
        // produce long probe chains through tombstones
        run_model(7, 13, 40);
    }

    #[test]
    fn test_model_non_prime_table() {
        run_model(42, 16, 64);
    }
}
