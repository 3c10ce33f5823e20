//! Loading, installing and extending the process-wide unit table
//!
//! Installing replaces the table for the whole test binary, so everything that
//! depends on it runs inside a single test.
mod common;

use approx::assert_relative_eq;
use physical_core::core_types::unit_table::{register, registered_names};
use physical_core::{Density, Dimension, Error, Item, Length, Solid, UnitDefinition, UnitTable, Weight};
use std::fs;

#[test]
fn test_unit_table_lifecycle() {
    // Built-ins are available without installing anything
    assert_relative_eq!(
        Density::kilograms_per_cubic_meter(1.0).convert_to("g_ml").unwrap().value(),
        0.001
    );
    assert_relative_eq!(
        Density::kilograms_per_cubic_meter(1.0).convert_to("g_l").unwrap().value(),
        1.0,
        max_relative = 1e-12
    );
    assert_relative_eq!(
        Density::kilograms_per_cubic_meter(1.0).convert_to("lbs_ft3").unwrap().value(),
        0.062427857858281754,
        max_relative = 1e-12
    );

    // A custom table from disk: built-ins plus a shipping "hand" length
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("units.json");
    UnitTable::default()
        .with_unit(UnitDefinition::new("hand", Dimension::Length, 10.16).with_alias("hands"))
        .save(&path)
        .unwrap();
    let table = UnitTable::load(&path).unwrap();
    table.validate().unwrap();
    table.install().unwrap();

    let horse = Length::new(15.0, "hands").unwrap();
    assert_eq!(horse.unit().name(), "hand");
    assert_relative_eq!(horse.convert_to("cm").unwrap().value(), 152.4, max_relative = 1e-12);
    assert!(registered_names(Dimension::Length).contains(&"hands"));

    // Runtime registration of a freight density unit
    register(&UnitDefinition::new("lb_100ft3", Dimension::Density, 0.0160184897305 / 100.0)).unwrap();
    let fill = Density::new(50.0, "lb_100ft3").unwrap();
    assert_relative_eq!(
        fill.convert_to("lb_ft3").unwrap().value(),
        0.5,
        max_relative = 1e-12
    );

    // Quantities built from custom units work through the whole model
    let crate_item = Item::builder()
        .dimensions([Length::new(2.0, "hand").unwrap(); 3])
        .weight(Weight::new(1.0, "lbs").unwrap())
        .build()
        .unwrap();
    assert_relative_eq!(crate_item.volume().value(), 20.32f64.powi(3), max_relative = 1e-12);

    // A name owned by another kind cannot be claimed
    assert_eq!(
        register(&UnitDefinition::new("hand", Dimension::Weight, 1.0)).unwrap_err(),
        Error::IncompatibleKind {
            unit: "hand".into(),
            expected: "weight",
            found: "length",
        }
    );

    // Canonical and constant-backed units keep their factors
    assert!(matches!(
        register(&UnitDefinition::new("cm", Dimension::Length, 2.0)),
        Err(Error::UnitTable(_))
    ));
    assert!(matches!(
        UnitTable::default()
            .with_unit(UnitDefinition::new("in", Dimension::Length, 2.5))
            .install(),
        Err(Error::UnitTable(_))
    ));
    assert_eq!(Length::new(1.0, "cm").unwrap(), Length::centimeters(1.0));
    assert_eq!(Length::new(1.0, "in").unwrap().unit(), Length::inches(1.0).unit());
    assert_eq!(Length::centimeters(3.0).convert_to("cm").unwrap().value(), 3.0);

    // Broken files are reported, not installed
    let broken = dir.path().join("broken.json");
    fs::write(&broken, "{\"units\": [").unwrap();
    assert!(matches!(UnitTable::load(&broken), Err(Error::UnitTable(_))));
    assert!(matches!(
        UnitTable::load(dir.path().join("missing.json")),
        Err(Error::UnitTable(_))
    ));

    // Reinstalling the defaults drops the custom units
    UnitTable::default().install().unwrap();
    assert_eq!(
        Length::new(1.0, "hand").unwrap_err(),
        Error::UnknownUnit("hand".into())
    );
}
