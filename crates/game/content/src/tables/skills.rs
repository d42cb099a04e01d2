//! `skills.json`: weapon-tag gated combat skills.

use std::path::PathBuf;

use game_defs::{SkillDef, SkillEffectType, TargetMode};
use indexmap::IndexMap;
use serde_json::Value;

use crate::error::Result;
use crate::repository::schema::{Field, FieldKind, Schema};
use crate::repository::{DefinitionTable, Repository, id_mapping};

const FIELDS: &[Field] = &[
    Field::required("name", FieldKind::Str),
    Field::required("description", FieldKind::Str),
    Field::required("tags", FieldKind::StrList),
    Field::required("required_weapon_tags", FieldKind::StrList),
    Field::required("target_mode", FieldKind::OneOf(&TargetMode::NAMES)),
    Field::required("max_targets", FieldKind::NonNegativeInt),
    Field::required("mp_cost", FieldKind::NonNegativeInt),
    Field::required("base_power", FieldKind::NonNegativeInt),
    Field::required("effect_type", FieldKind::OneOf(&SkillEffectType::NAMES)),
    Field::required("gold_value", FieldKind::NonNegativeInt),
];

const SCHEMA: Schema = Schema::new("skill", FIELDS);

#[derive(Debug, Default)]
pub struct SkillTable;

impl DefinitionTable for SkillTable {
    type Def = SkillDef;
    const FILE: &'static str = "skills.json";
    const KIND: &'static str = "skill";

    fn build(&self, raw: Value) -> Result<IndexMap<String, SkillDef>> {
        let mut skills = IndexMap::new();
        for (id, payload) in id_mapping(&raw, Self::FILE)? {
            let entry = SCHEMA.check(id, payload)?;
            let skill = SkillDef {
                id: id.to_string(),
                name: entry.str("name")?.to_string(),
                description: entry.str("description")?.to_string(),
                tags: entry.str_list("tags")?,
                required_weapon_tags: entry.str_list("required_weapon_tags")?,
                target_mode: entry.one_of("target_mode", &TargetMode::NAMES)?,
                max_targets: entry.u32("max_targets")?,
                mp_cost: entry.u32("mp_cost")?,
                base_power: entry.u32("base_power")?,
                effect_type: entry.one_of("effect_type", &SkillEffectType::NAMES)?,
                gold_value: entry.u32("gold_value")?,
            };
            skills.insert(id.to_string(), skill);
        }
        Ok(skills)
    }
}

pub type SkillsRepository = Repository<SkillTable>;

impl Repository<SkillTable> {
    pub fn new(definitions_dir: impl Into<PathBuf>) -> Self {
        Self::with_table(SkillTable, definitions_dir)
    }
}
