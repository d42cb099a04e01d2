//! `summons.json`: bond-powered summons.

use std::path::PathBuf;

use game_defs::{BondScaling, SummonDef};
use indexmap::IndexMap;
use serde_json::Value;

use crate::error::Result;
use crate::repository::schema::{Entry, Field, FieldKind, Schema};
use crate::repository::{DefinitionTable, Repository, id_mapping};

const FIELDS: &[Field] = &[
    Field::required("name", FieldKind::Str),
    Field::required("max_hp", FieldKind::NonNegativeInt),
    Field::required("max_mp", FieldKind::NonNegativeInt),
    Field::required("attack", FieldKind::NonNegativeInt),
    Field::required("defense", FieldKind::NonNegativeInt),
    Field::required("speed", FieldKind::NonNegativeInt),
    Field::required("bond_cost", FieldKind::PositiveInt),
    Field::optional("tags", FieldKind::StrList),
    Field::optional("bond_scaling", FieldKind::Object),
];

const SCALING_FIELDS: &[Field] = &[
    Field::optional("hp_per_bond", FieldKind::NonNegativeNumber),
    Field::optional("atk_per_bond", FieldKind::NonNegativeNumber),
    Field::optional("def_per_bond", FieldKind::NonNegativeNumber),
    Field::optional("init_per_bond", FieldKind::NonNegativeNumber),
];

const SCHEMA: Schema = Schema::new("summon", FIELDS);
const SCALING: Schema = Schema::new("summon bond_scaling", SCALING_FIELDS);

#[derive(Debug, Default)]
pub struct SummonTable;

fn bond_scaling(entry: &Entry<'_>) -> Result<BondScaling> {
    let Some(raw) = entry.get("bond_scaling") else {
        return Ok(BondScaling::default());
    };
    let scaling = SCALING.check_in(entry.field_context("bond_scaling"), raw)?;
    Ok(BondScaling {
        hp_per_bond: scaling.number_or("hp_per_bond", 0.0)?,
        atk_per_bond: scaling.number_or("atk_per_bond", 0.0)?,
        def_per_bond: scaling.number_or("def_per_bond", 0.0)?,
        init_per_bond: scaling.number_or("init_per_bond", 0.0)?,
    })
}

impl DefinitionTable for SummonTable {
    type Def = SummonDef;
    const FILE: &'static str = "summons.json";
    const KIND: &'static str = "summon";

    fn build(&self, raw: Value) -> Result<IndexMap<String, SummonDef>> {
        let mut summons = IndexMap::new();
        for (id, payload) in id_mapping(&raw, Self::FILE)? {
            let entry = SCHEMA.check(id, payload)?;
            let summon = SummonDef {
                id: id.to_string(),
                name: entry.str("name")?.to_string(),
                max_hp: entry.u32("max_hp")?,
                max_mp: entry.u32("max_mp")?,
                attack: entry.u32("attack")?,
                defense: entry.u32("defense")?,
                speed: entry.u32("speed")?,
                bond_cost: entry.positive("bond_cost")?,
                tags: entry.str_list("tags")?,
                bond_scaling: bond_scaling(&entry)?,
            };
            summons.insert(id.to_string(), summon);
        }
        Ok(summons)
    }
}

pub type SummonsRepository = Repository<SummonTable>;

impl Repository<SummonTable> {
    pub fn new(definitions_dir: impl Into<PathBuf>) -> Self {
        Self::with_table(SummonTable, definitions_dir)
    }
}
