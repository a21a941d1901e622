use chain_table::BucketHasher;
use chain_table::ChainedHashTable;
use chain_table::Polynomial31;
use chain_table::TableConfig;
use chain_table::TableError;

#[test]
fn players_end_to_end() -> Result<(), TableError> {
    let mut table = ChainedHashTable::with_config(
        TableConfig::default()
            .with_initial_capacity(4)
            .with_load_factor(0.75),
    );

    table.set("Messi", 10)?;
    table.set("C. Ronaldo", 7)?;
    assert_eq!(table.capacity(), 4);
    table.set("Neymar Jr.", 11)?;
    assert_eq!(table.capacity(), 8);
    table.set("Xavi", 6)?;
    table.set("Iniesta", 8)?;

    assert_eq!(table.len(), 5);
    assert_eq!(table.capacity(), 8);
    assert_eq!(table.get("Messi")?, Some(&10));
    assert!(table.has("C. Ronaldo")?);
    assert!(!table.has("Pele")?);

    let stored: usize = (0..table.capacity())
        .filter_map(|index| table.bucket(index))
        .map(|chain| chain.len())
        .sum();
    assert_eq!(stored, 5);

    for key in ["Messi", "C. Ronaldo", "Neymar Jr.", "Xavi", "Iniesta"] {
        let index = Polynomial31.bucket(key, 8).unwrap();
        assert!(table.bucket(index).and_then(|c| c.find_by_key(key)).is_some());
    }
    Ok(())
}

#[test]
fn defaults_are_sixteen_and_point_eight() -> Result<(), TableError> {
    let mut table = ChainedHashTable::new();
    assert_eq!(table.capacity(), 16);
    assert_eq!(table.load_factor(), 0.8);

    // 16 * 0.8 = 12.8, so the 13th distinct key triggers the first resize.
    for i in 0..12 {
        table.set(format!("player_{i}"), i)?;
    }
    assert_eq!(table.capacity(), 16);
    table.set("player_12", 12)?;
    assert_eq!(table.capacity(), 32);

    for i in 0..13 {
        assert_eq!(table.get(&format!("player_{i}"))?, Some(&i));
    }
    Ok(())
}

#[test]
fn zero_capacity_surfaces_out_of_bounds() {
    let mut table = ChainedHashTable::with_capacity(0);
    assert_eq!(
        table.set("Messi", 10),
        Err(TableError::OutOfBounds {
            index: None,
            capacity: 0
        })
    );
    assert!(table.is_empty());
}
