//! Equipment loadout parsing shared by classes, party members and enemies.

use game_defs::{ArmourSlot, StartingAttributes};
use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{ContentError, Result};
use crate::repository::fields::{
    assert_exact_fields, require_mapping, require_one_of, require_str, require_u32,
};
use crate::tables::armour::ArmourRepository;
use crate::tables::weapons::WeaponsRepository;

/// Parses an armour loadout: either a single body armour id or a
/// `{slot: armour_id}` object. Every id must exist in `armour`.
pub(crate) fn armour_slots(
    value: &Value,
    context: &str,
    armour: &ArmourRepository,
) -> Result<IndexMap<ArmourSlot, String>> {
    let mut slots = IndexMap::new();
    if let Some(armour_id) = value.as_str() {
        check_armour(armour_id, context, armour)?;
        slots.insert(ArmourSlot::Body, armour_id.to_string());
        return Ok(slots);
    }

    let mapping = require_mapping(value, context)
        .map_err(|_| ContentError::validation(context, "must be an armour id or a slot mapping"))?;
    for (slot_name, armour_id) in mapping {
        let slot_context = format!("{context}.{slot_name}");
        let slot: ArmourSlot =
            require_one_of(&Value::from(slot_name.as_str()), &slot_context, &ArmourSlot::NAMES)?;
        let armour_id = require_str(armour_id, &slot_context)?;
        check_armour(armour_id, context, armour)?;
        slots.insert(slot, armour_id.to_string());
    }
    Ok(slots)
}

fn check_armour(armour_id: &str, context: &str, armour: &ArmourRepository) -> Result<()> {
    if armour.contains(armour_id)? {
        Ok(())
    } else {
        Err(ContentError::reference(context, "armour", armour_id))
    }
}

/// Fails with a reference error for the first weapon id not in `weapons`.
pub(crate) fn check_weapons(
    weapon_ids: &[String],
    context: &str,
    weapons: &WeaponsRepository,
) -> Result<()> {
    for weapon_id in weapon_ids {
        if !weapons.contains(weapon_id)? {
            return Err(ContentError::reference(context, "weapon", weapon_id.as_str()));
        }
    }
    Ok(())
}

/// Parses `{STR, DEX, INT, VIT, BOND}`; absent keys are zero.
pub(crate) fn starting_attributes(value: Option<&Value>, context: &str) -> Result<StartingAttributes> {
    let Some(value) = value.filter(|v| !v.is_null()) else {
        return Ok(StartingAttributes::default());
    };
    let map = require_mapping(value, context)?;
    assert_exact_fields(map, context, &[], &StartingAttributes::KEYS)?;

    let read = |key: &str| -> Result<u32> {
        match map.get(key).filter(|v| !v.is_null()) {
            Some(v) => require_u32(v, &format!("{context}.{key}")),
            None => Ok(0),
        }
    };
    Ok(StartingAttributes {
        strength: read("STR")?,
        dexterity: read("DEX")?,
        intelligence: read("INT")?,
        vitality: read("VIT")?,
        bond: read("BOND")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn attributes_default_to_zero() {
        let attrs = starting_attributes(Some(&json!({"STR": 3, "BOND": 1})), "class 'c'").unwrap();
        assert_eq!(attrs.strength, 3);
        assert_eq!(attrs.bond, 1);
        assert_eq!(attrs.dexterity, 0);
        assert_eq!(starting_attributes(None, "c").unwrap(), StartingAttributes::default());
    }

    #[test]
    fn attributes_reject_unknown_keys_and_negatives() {
        assert!(starting_attributes(Some(&json!({"LUCK": 2})), "c").is_err());
        assert!(starting_attributes(Some(&json!({"STR": -2})), "c").is_err());
    }
}
