//! `enemies.json`: standalone stat blocks and encounter groups in one table.
//!
//! An entry carrying `enemy_ids` is a group; anything else must be a complete
//! stat block. The two shapes have separate schemas, so a group with a stray
//! `hp` field is a schema error rather than a half-enemy.
//!
//! Standalone enemies may carry `equipment: {weapons, armour}`, checked
//! against the weapon and armour tables. Group rosters must name standalone
//! enemies from the same file.

use std::path::PathBuf;
use std::sync::Arc;

use game_defs::{EnemyDef, EnemyEntry, EnemyGroupDef};
use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{ContentError, Result};
use crate::repository::fields::{assert_exact_fields, require_non_empty_str, require_str_list};
use crate::repository::schema::{Entry, Field, FieldKind, Schema};
use crate::repository::{DefinitionTable, Repository, id_mapping};
use crate::tables::armour::ArmourRepository;
use crate::tables::loadout::{armour_slots, check_weapons};
use crate::tables::weapons::WeaponsRepository;

const STANDALONE_FIELDS: &[Field] = &[
    Field::required("name", FieldKind::Str),
    Field::required("hp", FieldKind::NonNegativeInt),
    Field::required("mp", FieldKind::NonNegativeInt),
    Field::required("attack", FieldKind::NonNegativeInt),
    Field::required("defense", FieldKind::NonNegativeInt),
    Field::required("speed", FieldKind::NonNegativeInt),
    Field::required("rewards_exp", FieldKind::NonNegativeInt),
    Field::required("rewards_gold", FieldKind::NonNegativeInt),
    Field::optional("tags", FieldKind::StrList),
    Field::optional("knowledge_key", FieldKind::NonEmptyStr),
    Field::optional("equipment", FieldKind::Object),
];

const GROUP_FIELDS: &[Field] = &[
    Field::required("name", FieldKind::Str),
    Field::required("enemy_ids", FieldKind::List),
    Field::optional("tags", FieldKind::StrList),
];

const STANDALONE: Schema = Schema::new("enemy", STANDALONE_FIELDS);
const GROUP: Schema = Schema::new("enemy group", GROUP_FIELDS);

#[derive(Debug)]
pub struct EnemyTable {
    weapons: Arc<WeaponsRepository>,
    armour: Arc<ArmourRepository>,
}

impl EnemyTable {
    pub fn new(weapons: Arc<WeaponsRepository>, armour: Arc<ArmourRepository>) -> Self {
        Self { weapons, armour }
    }

    fn standalone(&self, id: &str, entry: &Entry<'_>) -> Result<EnemyDef> {
        let mut weapon_ids = Vec::new();
        let mut armour = IndexMap::new();
        if let Some(equipment) = entry.opt_object("equipment")? {
            let context = entry.field_context("equipment");
            assert_exact_fields(equipment, &context, &[], &["weapons", "armour"])?;
            weapon_ids = require_str_list(equipment.get("weapons"), &format!("{context}.weapons"))?;
            check_weapons(&weapon_ids, &context, &self.weapons)?;
            if let Some(value) = equipment.get("armour").filter(|value| !value.is_null()) {
                armour = armour_slots(value, &format!("{context}.armour"), &self.armour)?;
            }
        }

        Ok(EnemyDef {
            id: id.to_string(),
            name: entry.str("name")?.to_string(),
            hp: entry.u32("hp")?,
            mp: entry.u32("mp")?,
            attack: entry.u32("attack")?,
            defense: entry.u32("defense")?,
            speed: entry.u32("speed")?,
            rewards_exp: entry.u32("rewards_exp")?,
            rewards_gold: entry.u32("rewards_gold")?,
            tags: entry.str_list("tags")?,
            knowledge_key: entry.opt_non_empty_str("knowledge_key")?.map(str::to_string),
            weapon_ids,
            armour_slots: armour,
        })
    }

    fn group(id: &str, entry: &Entry<'_>) -> Result<EnemyGroupDef> {
        let roster = entry.list("enemy_ids")?;
        if roster.is_empty() {
            return Err(ContentError::validation(
                entry.field_context("enemy_ids"),
                "must list at least one enemy",
            ));
        }
        let enemy_ids = roster
            .iter()
            .enumerate()
            .map(|(index, member)| {
                let context = format!("{}[{index}]", entry.field_context("enemy_ids"));
                require_non_empty_str(member, &context).map(str::to_string)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(EnemyGroupDef {
            id: id.to_string(),
            name: entry.str("name")?.to_string(),
            enemy_ids,
            tags: entry.str_list("tags")?,
        })
    }
}

impl DefinitionTable for EnemyTable {
    type Def = EnemyEntry;
    const FILE: &'static str = "enemies.json";
    const KIND: &'static str = "enemy";

    fn build(&self, raw: Value) -> Result<IndexMap<String, EnemyEntry>> {
        let mut enemies = IndexMap::new();
        for (id, payload) in id_mapping(&raw, Self::FILE)? {
            let is_group = payload
                .as_object()
                .is_some_and(|map| map.contains_key("enemy_ids"));
            let record = if is_group {
                EnemyEntry::Group(Self::group(id, &GROUP.check(id, payload)?)?)
            } else {
                EnemyEntry::Standalone(self.standalone(id, &STANDALONE.check(id, payload)?)?)
            };
            enemies.insert(id.to_string(), record);
        }

        for group in enemies.values().filter_map(EnemyEntry::as_group) {
            for (index, member) in group.enemy_ids.iter().enumerate() {
                let is_standalone = enemies
                    .get(member)
                    .is_some_and(|entry| entry.as_standalone().is_some());
                if !is_standalone {
                    return Err(ContentError::reference(
                        format!("enemy group '{}' enemy_ids[{index}]", group.id),
                        "enemy",
                        member.as_str(),
                    ));
                }
            }
        }
        Ok(enemies)
    }
}

/// Enemy table with separate accessors for the two entry shapes.
///
/// [`get`](Self::get) and [`all`](Self::all) serve standalone enemies only;
/// groups are reached through [`get_group`](Self::get_group).
#[derive(Debug)]
pub struct EnemiesRepository {
    inner: Repository<EnemyTable>,
}

impl EnemiesRepository {
    pub fn new(
        definitions_dir: impl Into<PathBuf>,
        weapons: Arc<WeaponsRepository>,
        armour: Arc<ArmourRepository>,
    ) -> Self {
        Self {
            inner: Repository::with_table(EnemyTable::new(weapons, armour), definitions_dir),
        }
    }

    /// Builds its own weapon and armour repositories over the same directory.
    pub fn standalone(definitions_dir: impl Into<PathBuf>) -> Self {
        let dir = definitions_dir.into();
        let weapons = Arc::new(WeaponsRepository::new(&dir));
        let armour = Arc::new(ArmourRepository::new(&dir));
        Self::new(dir, weapons, armour)
    }

    pub fn get(&self, id: &str) -> Result<&EnemyDef> {
        self.inner
            .ensure_loaded()?
            .get(id)
            .and_then(EnemyEntry::as_standalone)
            .ok_or_else(|| ContentError::not_found("enemy", id))
    }

    pub fn get_group(&self, id: &str) -> Result<&EnemyGroupDef> {
        self.inner
            .ensure_loaded()?
            .get(id)
            .and_then(EnemyEntry::as_group)
            .ok_or_else(|| ContentError::not_found("enemy group", id))
    }

    /// Standalone enemies in file order.
    pub fn all(&self) -> Result<Vec<&EnemyDef>> {
        Ok(self
            .inner
            .ensure_loaded()?
            .values()
            .filter_map(EnemyEntry::as_standalone)
            .collect())
    }

    pub fn groups(&self) -> Result<Vec<&EnemyGroupDef>> {
        Ok(self
            .inner
            .ensure_loaded()?
            .values()
            .filter_map(EnemyEntry::as_group)
            .collect())
    }

    /// Every entry of either shape, in file order.
    pub fn entries(&self) -> Result<Vec<&EnemyEntry>> {
        self.inner.all()
    }

    pub fn is_loaded(&self) -> bool {
        self.inner.is_loaded()
    }

    pub fn file_path(&self) -> PathBuf {
        self.inner.file_path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::testing::write_json;
    use game_defs::ArmourSlot;
    use serde_json::json;

    fn grunt() -> Value {
        json!({
            "name": "Goblin Grunt", "hp": 12, "mp": 0, "attack": 3, "defense": 1,
            "speed": 4, "rewards_exp": 5, "rewards_gold": 2, "tags": ["goblin"]
        })
    }

    fn build(raw: Value) -> Result<IndexMap<String, EnemyEntry>> {
        let dir = tempfile::tempdir().unwrap();
        write_json(
            dir.path(),
            "weapons.json",
            json!({"rusty_blade": {"name": "Rusty Blade", "attack": 2, "value": 3}}),
        );
        write_json(
            dir.path(),
            "armour.json",
            json!({
                "hide_vest": {"name": "Hide Vest", "slot": "body", "defense": 2, "value": 5},
                "iron_pot": {"name": "Iron Pot", "slot": "head", "defense": 1, "value": 4}
            }),
        );
        let table = EnemyTable::new(
            Arc::new(WeaponsRepository::new(dir.path())),
            Arc::new(ArmourRepository::new(dir.path())),
        );
        table.build(raw)
    }

    #[test]
    fn entry_with_enemy_ids_is_a_group() {
        let raw = json!({
            "goblin_grunt": grunt(),
            "goblin_pack": {"name": "Goblin Pack", "enemy_ids": ["goblin_grunt", "goblin_grunt"], "tags": []}
        });
        let enemies = build(raw).unwrap();

        assert!(matches!(enemies["goblin_grunt"], EnemyEntry::Standalone(_)));
        let pack = enemies["goblin_pack"].as_group().unwrap();
        assert_eq!(pack.enemy_ids, ["goblin_grunt", "goblin_grunt"]);
    }

    #[test]
    fn roster_may_name_enemies_declared_later() {
        let raw = json!({
            "goblin_pack": {"name": "Goblin Pack", "enemy_ids": ["goblin_grunt"]},
            "goblin_grunt": grunt()
        });
        assert!(build(raw).is_ok());
    }

    #[test]
    fn roster_naming_unknown_enemy_is_reference_failure() {
        let raw = json!({
            "goblin_grunt": grunt(),
            "goblin_pack": {"name": "Goblin Pack", "enemy_ids": ["goblin_grunt", "goblin_chief"]}
        });
        let err = build(raw).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Reference);
        assert_eq!(
            err.to_string(),
            "enemy group 'goblin_pack' enemy_ids[1] references missing enemy 'goblin_chief'"
        );
    }

    #[test]
    fn roster_naming_another_group_is_reference_failure() {
        let raw = json!({
            "goblin_grunt": grunt(),
            "goblin_pack": {"name": "Goblin Pack", "enemy_ids": ["goblin_grunt"]},
            "goblin_horde": {"name": "Goblin Horde", "enemy_ids": ["goblin_pack"]}
        });
        assert_eq!(build(raw).unwrap_err().kind(), ErrorKind::Reference);
    }

    #[test]
    fn padded_roster_id_is_not_trimmed_into_a_match() {
        let raw = json!({
            "goblin_grunt": grunt(),
            "goblin_pack": {"name": "Goblin Pack", "enemy_ids": [" goblin_grunt"]}
        });
        let err = build(raw).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Reference);
        assert!(err.to_string().ends_with("missing enemy ' goblin_grunt'"));
    }

    #[test]
    fn group_with_combat_fields_is_schema_error() {
        let raw = json!({"pack": {"name": "Pack", "enemy_ids": ["a"], "hp": 3}});
        match build(raw).unwrap_err() {
            ContentError::Schema { context, unknown, .. } => {
                assert_eq!(context, "enemy group 'pack'");
                assert_eq!(unknown, ["hp"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn standalone_missing_stats_lists_them_all() {
        let raw = json!({"blob": {"name": "Blob", "hp": 3}});
        match build(raw).unwrap_err() {
            ContentError::Schema { missing, .. } => assert_eq!(
                missing,
                ["attack", "defense", "mp", "rewards_exp", "rewards_gold", "speed"]
            ),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_roster_is_rejected() {
        let raw = json!({"pack": {"name": "Pack", "enemy_ids": []}});
        assert_eq!(build(raw).unwrap_err().kind(), ErrorKind::Validation);
    }

    #[test]
    fn blank_knowledge_key_is_rejected() {
        let mut enemy = grunt();
        enemy["knowledge_key"] = json!("  ");
        let err = build(json!({"g": enemy})).unwrap_err();
        assert_eq!(err.to_string(), "enemy 'g' knowledge_key must not be empty");
    }

    #[test]
    fn equipment_is_read_and_checked() {
        let mut enemy = grunt();
        enemy["equipment"] = json!({
            "weapons": ["rusty_blade"],
            "armour": {"body": "hide_vest", "head": "iron_pot"}
        });
        let enemies = build(json!({"g": enemy})).unwrap();
        let grunt = enemies["g"].as_standalone().unwrap();

        assert_eq!(grunt.weapon_ids, ["rusty_blade"]);
        assert_eq!(grunt.armour_in(ArmourSlot::Head), Some("iron_pot"));
        assert!(grunt.is_equipped());
    }

    #[test]
    fn armour_id_string_fills_body_slot() {
        let mut enemy = grunt();
        enemy["equipment"] = json!({"armour": "hide_vest"});
        let enemies = build(json!({"g": enemy})).unwrap();
        let grunt = enemies["g"].as_standalone().unwrap();

        assert!(grunt.weapon_ids.is_empty());
        assert_eq!(grunt.armour_in(ArmourSlot::Body), Some("hide_vest"));
    }

    #[test]
    fn unequipped_enemy_has_no_loadout() {
        let enemies = build(json!({"g": grunt()})).unwrap();
        assert!(!enemies["g"].as_standalone().unwrap().is_equipped());
    }

    #[test]
    fn missing_enemy_weapon_is_reference_failure() {
        let mut enemy = grunt();
        enemy["equipment"] = json!({"weapons": ["war_axe"]});
        let err = build(json!({"g": enemy})).unwrap_err();
        assert_eq!(
            err.to_string(),
            "enemy 'g' equipment references missing weapon 'war_axe'"
        );
    }

    #[test]
    fn missing_enemy_armour_is_reference_failure() {
        let mut enemy = grunt();
        enemy["equipment"] = json!({"armour": "plate"});
        let err = build(json!({"g": enemy})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Reference);
        assert!(err.to_string().contains("armour 'plate'"));
    }

    #[test]
    fn unknown_equipment_key_is_schema_error() {
        let mut enemy = grunt();
        enemy["equipment"] = json!({"shield": "buckler"});
        match build(json!({"g": enemy})).unwrap_err() {
            ContentError::Schema { context, unknown, .. } => {
                assert_eq!(context, "enemy 'g' equipment");
                assert_eq!(unknown, ["shield"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
