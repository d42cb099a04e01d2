//! `weapons.json`: `{id: {name, attack, value, ...}}`.

use std::path::PathBuf;

use game_defs::WeaponDef;
use indexmap::IndexMap;
use serde_json::Value;

use crate::error::Result;
use crate::repository::schema::{Field, FieldKind, Schema};
use crate::repository::{DefinitionTable, Repository, id_mapping};

const FIELDS: &[Field] = &[
    Field::required("name", FieldKind::Str),
    Field::required("attack", FieldKind::NonNegativeInt),
    Field::required("value", FieldKind::NonNegativeInt),
    Field::optional("tags", FieldKind::StrList),
    Field::optional("slot_cost", FieldKind::PositiveInt),
    Field::optional("default_basic_attack_id", FieldKind::NonEmptyStr),
    Field::optional("energy_bonus", FieldKind::Int),
];

const SCHEMA: Schema = Schema::new("weapon", FIELDS);

#[derive(Debug, Default)]
pub struct WeaponTable;

impl DefinitionTable for WeaponTable {
    type Def = WeaponDef;
    const FILE: &'static str = "weapons.json";
    const KIND: &'static str = "weapon";

    fn build(&self, raw: Value) -> Result<IndexMap<String, WeaponDef>> {
        let mut weapons = IndexMap::new();
        for (id, payload) in id_mapping(&raw, Self::FILE)? {
            let entry = SCHEMA.check(id, payload)?;
            let weapon = WeaponDef {
                id: id.to_string(),
                name: entry.str("name")?.to_string(),
                attack: entry.u32("attack")?,
                value: entry.u32("value")?,
                tags: entry.str_list("tags")?,
                slot_cost: entry.positive_or("slot_cost", 1)?,
                default_basic_attack_id: entry
                    .opt_non_empty_str("default_basic_attack_id")?
                    .map(str::to_string),
                energy_bonus: entry.i32_or("energy_bonus", 0)?,
            };
            weapons.insert(id.to_string(), weapon);
        }
        Ok(weapons)
    }
}

pub type WeaponsRepository = Repository<WeaponTable>;

impl Repository<WeaponTable> {
    pub fn new(definitions_dir: impl Into<PathBuf>) -> Self {
        Self::with_table(WeaponTable, definitions_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ContentError, ErrorKind};
    use serde_json::json;

    #[test]
    fn builds_with_defaults() {
        let raw = json!({"iron_sword": {"name": "Iron Sword", "attack": 5, "value": 20}});
        let weapons = WeaponTable.build(raw).unwrap();
        let sword = &weapons["iron_sword"];

        assert_eq!(sword.attack, 5);
        assert_eq!(sword.value, 20);
        assert_eq!(sword.slot_cost, 1);
        assert_eq!(sword.energy_bonus, 0);
        assert!(sword.tags.is_empty());
        assert_eq!(sword.default_basic_attack_id, None);
    }

    #[test]
    fn optional_fields_are_read() {
        let raw = json!({"greatsword": {
            "name": "Greatsword", "attack": 9, "value": 80, "tags": ["sword", "heavy"],
            "slot_cost": 2, "default_basic_attack_id": "cleave", "energy_bonus": -1
        }});
        let weapons = WeaponTable.build(raw).unwrap();
        let blade = &weapons["greatsword"];

        assert_eq!(blade.slot_cost, 2);
        assert_eq!(blade.energy_bonus, -1);
        assert!(blade.has_tag("heavy"));
        assert_eq!(blade.default_basic_attack_id.as_deref(), Some("cleave"));
    }

    #[test]
    fn negative_attack_is_rejected() {
        let raw = json!({"bad": {"name": "Bad", "attack": -1, "value": 0}});
        let err = WeaponTable.build(raw).unwrap_err();
        assert_eq!(err.to_string(), "weapon 'bad' attack must be non-negative");
    }

    #[test]
    fn float_and_bool_attack_are_rejected() {
        for attack in [json!(5.0), json!(true)] {
            let raw = json!({"w": {"name": "W", "attack": attack, "value": 1}});
            let err = WeaponTable.build(raw).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation);
        }
    }

    #[test]
    fn missing_and_unknown_fields_reported_together() {
        let raw = json!({"w": {"name": "W", "attack": 1, "colour": "red", "weight": 3}});
        match WeaponTable.build(raw).unwrap_err() {
            ContentError::Schema {
                context,
                missing,
                unknown,
            } => {
                assert_eq!(context, "weapon 'w'");
                assert_eq!(missing, ["value"]);
                assert_eq!(unknown, ["colour", "weight"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn top_level_must_be_object() {
        let err = WeaponTable.build(json!([])).unwrap_err();
        assert_eq!(err.to_string(), "weapons.json must be an object");
    }
}
