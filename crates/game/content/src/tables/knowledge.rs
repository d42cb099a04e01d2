//! `knowledge.json`: what each party member already knows about enemies.

use std::path::PathBuf;

use game_defs::KnowledgeEntry;
use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{ContentError, Result};
use crate::repository::fields::{require_list, require_u32};
use crate::repository::schema::{Entry, Field, FieldKind, Schema};
use crate::repository::{DefinitionTable, Repository, id_mapping};

const MEMBER_FIELDS: &[Field] = &[Field::required("known_enemies", FieldKind::List)];

const ENTRY_FIELDS: &[Field] = &[
    Field::required("revealed_fields", FieldKind::Object),
    Field::optional("enemy_tags", FieldKind::StrList),
    Field::optional("max_level", FieldKind::NonNegativeInt),
];

const REVEALED_FIELDS: &[Field] = &[
    Field::optional("hp_range", FieldKind::List),
    Field::optional("speed_hint", FieldKind::Str),
    Field::optional("behavior", FieldKind::Str),
];

const MEMBER: Schema = Schema::new("knowledge", MEMBER_FIELDS);
const ENTRY: Schema = Schema::new("knowledge entry", ENTRY_FIELDS);
const REVEALED: Schema = Schema::new("knowledge revealed_fields", REVEALED_FIELDS);

#[derive(Debug, Default)]
pub struct KnowledgeTable;

fn hp_range(revealed: &Entry<'_>) -> Result<Option<(u32, u32)>> {
    let Some(raw) = revealed.get("hp_range") else {
        return Ok(None);
    };
    let context = revealed.field_context("hp_range");
    let [low, high] = require_list(raw, &context)? else {
        return Err(ContentError::validation(context, "must hold exactly two values"));
    };
    let low = require_u32(low, &format!("{context}[0]"))?;
    let high = require_u32(high, &format!("{context}[1]"))?;
    if low > high {
        return Err(ContentError::validation(
            context,
            format!("lower bound {low} exceeds upper bound {high}"),
        ));
    }
    Ok(Some((low, high)))
}

fn knowledge_entry(raw: &Value, context: String) -> Result<KnowledgeEntry> {
    let entry = ENTRY.check_in(context, raw)?;
    let revealed = REVEALED.check_in(
        entry.field_context("revealed_fields"),
        entry.value("revealed_fields")?,
    )?;
    Ok(KnowledgeEntry {
        enemy_tags: entry.str_list("enemy_tags")?,
        max_level: entry.opt_u32("max_level")?,
        hp_range: hp_range(&revealed)?,
        speed_hint: revealed.opt_str("speed_hint")?.map(str::to_string),
        behavior: revealed.opt_str("behavior")?.map(str::to_string),
    })
}

impl DefinitionTable for KnowledgeTable {
    type Def = Vec<KnowledgeEntry>;
    const FILE: &'static str = "knowledge.json";
    const KIND: &'static str = "knowledge";

    fn build(&self, raw: Value) -> Result<IndexMap<String, Vec<KnowledgeEntry>>> {
        let mut knowledge = IndexMap::new();
        for (member_id, payload) in id_mapping(&raw, Self::FILE)? {
            let member = MEMBER.check(member_id, payload)?;
            let entries = member
                .list("known_enemies")?
                .iter()
                .enumerate()
                .map(|(index, raw_entry)| {
                    knowledge_entry(
                        raw_entry,
                        format!("{}[{index}]", member.field_context("known_enemies")),
                    )
                })
                .collect::<Result<Vec<_>>>()?;
            knowledge.insert(member_id.to_string(), entries);
        }
        Ok(knowledge)
    }
}

pub type KnowledgeRepository = Repository<KnowledgeTable>;

impl Repository<KnowledgeTable> {
    pub fn new(definitions_dir: impl Into<PathBuf>) -> Self {
        Self::with_table(KnowledgeTable, definitions_dir)
    }

    /// Entries known by `member_id`; empty for members with no knowledge.
    pub fn entries_for(&self, member_id: &str) -> Result<&[KnowledgeEntry]> {
        Ok(self
            .ensure_loaded()?
            .get(member_id)
            .map(Vec::as_slice)
            .unwrap_or_default())
    }
}
