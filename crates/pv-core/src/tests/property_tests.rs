use crate::{Catalog, FieldAccessor, FieldLookup, Record};

use proptest::prelude::*;

// =========================================================================
// Property-Based Tests - Field Accessor
// =========================================================================

proptest! {
    #[test]
    fn given_unknown_name_when_set_field_then_record_unchanged(name in "zz[a-z]{4,12}", value in "[01]") {
        let accessor = FieldAccessor::exact(Catalog::standard());
        let mut record = Record::parse(r#"{"name":"Alice","password":"x"}"#).unwrap();
        let before = record.clone();

        prop_assert!(accessor.set_field(&mut record, &name, &value).is_err());
        prop_assert_eq!(record, before);
    }

    #[test]
    fn given_any_catalog_id_when_resolved_in_either_mode_then_maps_to_itself(
        index in 0usize..Catalog::standard().len(),
        lenient in any::<bool>(),
    ) {
        let catalog = Catalog::standard();
        let id = &catalog.entries()[index].id;
        let lookup = FieldLookup::from_lenient_flag(lenient);

        let resolved = lookup.resolve(catalog, &id.to_uppercase());

        prop_assert_eq!(resolved.map(|p| p.id.as_str()), Some(id.as_str()));
    }

    #[test]
    fn given_text_value_when_set_and_serialized_then_reparsed_value_matches(value in "\\PC{0,40}") {
        let accessor = FieldAccessor::exact(Catalog::standard());
        let mut record = Record::new();
        accessor.set_field(&mut record, "font", &value).unwrap();

        let reparsed = Record::parse(&record.to_canonical().unwrap()).unwrap();

        prop_assert_eq!(reparsed.get_str("font"), Some(value.as_str()));
    }
}
