//! `knowledge_rules.json`: kill thresholds and HP visibility per knowledge tier.
//!
//! The file holds one object; it is cached as the single record
//! [`RULES_ID`] and read back through [`KnowledgeRulesRepository::rules`].

use std::path::PathBuf;

use game_defs::{HpVisibility, KnowledgeRules, KnowledgeThresholds, KnowledgeTier};
use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{ContentError, Result};
use crate::repository::fields::{require_mapping, require_one_of};
use crate::repository::schema::{Field, FieldKind, Schema};
use crate::repository::{DefinitionTable, Repository};

pub const RULES_ID: &str = "rules";

const FIELDS: &[Field] = &[
    Field::required("thresholds", FieldKind::Object),
    Field::required("hp_visibility_by_tier", FieldKind::Object),
    Field::optional("overrides", FieldKind::Object),
];

const THRESHOLD_FIELDS: &[Field] = &[
    Field::required("tier1_kills", FieldKind::NonNegativeInt),
    Field::required("tier2_kills", FieldKind::NonNegativeInt),
    Field::required("tier3_kills", FieldKind::NonNegativeInt),
];

const TIER_NAMES: [&str; 4] = ["0", "1", "2", "3"];

const SCHEMA: Schema = Schema::new("knowledge_rules", FIELDS);
const THRESHOLDS: Schema = Schema::new("knowledge_rules thresholds", THRESHOLD_FIELDS);

#[derive(Debug, Default)]
pub struct KnowledgeRulesTable;

impl DefinitionTable for KnowledgeRulesTable {
    type Def = KnowledgeRules;
    const FILE: &'static str = "knowledge_rules.json";
    const KIND: &'static str = "knowledge rules";

    fn build(&self, raw: Value) -> Result<IndexMap<String, KnowledgeRules>> {
        let entry = SCHEMA.check_in("knowledge_rules".to_string(), &raw)?;

        let thresholds_entry =
            THRESHOLDS.check_in(entry.field_context("thresholds"), entry.value("thresholds")?)?;
        let thresholds = KnowledgeThresholds {
            tier1_kills: thresholds_entry.u32("tier1_kills")?,
            tier2_kills: thresholds_entry.u32("tier2_kills")?,
            tier3_kills: thresholds_entry.u32("tier3_kills")?,
        };
        if thresholds.tier1_kills > thresholds.tier2_kills
            || thresholds.tier2_kills > thresholds.tier3_kills
        {
            return Err(ContentError::validation(
                entry.field_context("thresholds"),
                format!(
                    "must not decrease between tiers (got {}, {}, {})",
                    thresholds.tier1_kills, thresholds.tier2_kills, thresholds.tier3_kills
                ),
            ));
        }

        let visibility_context = entry.field_context("hp_visibility_by_tier");
        let mut by_tier = IndexMap::new();
        for (key, mode) in entry.object("hp_visibility_by_tier")? {
            let tier: KnowledgeTier = require_one_of(
                &Value::from(key.as_str()),
                &format!("{visibility_context} key"),
                &TIER_NAMES,
            )?;
            let mode: HpVisibility =
                require_one_of(mode, &format!("{visibility_context} {key}"), &HpVisibility::NAMES)?;
            by_tier.insert(tier, mode);
        }
        let missing: Vec<String> = KnowledgeTier::ALL
            .iter()
            .filter(|tier| !by_tier.contains_key(*tier))
            .map(ToString::to_string)
            .collect();
        if !missing.is_empty() {
            return Err(ContentError::validation(
                visibility_context,
                format!("is missing tiers {missing:?}"),
            ));
        }
        by_tier.sort_keys();

        let mut overrides = IndexMap::new();
        if let Some(raw_overrides) = entry.opt_object("overrides")? {
            for (key, value) in raw_overrides {
                let context = format!("{} {key}", entry.field_context("overrides"));
                overrides.insert(key.clone(), require_mapping(value, &context)?.clone());
            }
        }

        let rules = KnowledgeRules {
            thresholds,
            hp_visibility_by_tier: by_tier,
            overrides,
        };
        Ok(IndexMap::from([(RULES_ID.to_string(), rules)]))
    }
}

pub type KnowledgeRulesRepository = Repository<KnowledgeRulesTable>;

impl Repository<KnowledgeRulesTable> {
    pub fn new(definitions_dir: impl Into<PathBuf>) -> Self {
        Self::with_table(KnowledgeRulesTable, definitions_dir)
    }

    pub fn rules(&self) -> Result<&KnowledgeRules> {
        self.get(RULES_ID)
    }
}
