//! `shops.json`: shops under a top-level `{"shops": {...}}` object.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use game_defs::{ShopDef, ShopStockEntryDef, ShopType};
use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{ContentError, Result};
use crate::repository::fields::require_mapping;
use crate::repository::schema::{Field, FieldKind, Schema};
use crate::repository::{DefinitionTable, Repository, id_mapping};
use crate::tables::armour::ArmourRepository;
use crate::tables::items::ItemsRepository;
use crate::tables::weapons::WeaponsRepository;

const DEFAULT_STOCK_SIZE: u32 = 10;

const FIELDS: &[Field] = &[
    Field::required("id", FieldKind::Str),
    Field::required("name", FieldKind::Str),
    Field::required("shop_type", FieldKind::OneOf(&ShopType::NAMES)),
    Field::optional("tags", FieldKind::StrList),
    Field::optional("stock_pool", FieldKind::List),
    Field::optional("stock_size", FieldKind::PositiveInt),
];

const STOCK_FIELDS: &[Field] = &[
    Field::required("id", FieldKind::Str),
    Field::required("qty", FieldKind::PositiveInt),
];

const SCHEMA: Schema = Schema::new("shop", FIELDS);
const STOCK: Schema = Schema::new("shop stock entry", STOCK_FIELDS);

#[derive(Debug)]
pub struct ShopTable {
    items: Arc<ItemsRepository>,
    weapons: Arc<WeaponsRepository>,
    armour: Arc<ArmourRepository>,
}

impl ShopTable {
    pub fn new(
        items: Arc<ItemsRepository>,
        weapons: Arc<WeaponsRepository>,
        armour: Arc<ArmourRepository>,
    ) -> Self {
        Self {
            items,
            weapons,
            armour,
        }
    }

    /// Whether `id` exists in the table this kind of shop sells from.
    fn stocks(&self, shop_type: ShopType, id: &str) -> Result<bool> {
        match shop_type {
            ShopType::Item => self.items.contains(id),
            ShopType::Weapon => self.weapons.contains(id),
            ShopType::Armour => self.armour.contains(id),
        }
    }
}

fn stock_target(shop_type: ShopType) -> &'static str {
    match shop_type {
        ShopType::Item => "item",
        ShopType::Weapon => "weapon",
        ShopType::Armour => "armour",
    }
}

impl DefinitionTable for ShopTable {
    type Def = ShopDef;
    const FILE: &'static str = "shops.json";
    const KIND: &'static str = "shop";

    fn build(&self, raw: Value) -> Result<IndexMap<String, ShopDef>> {
        let shops_raw = require_mapping(&raw, Self::FILE)?
            .get("shops")
            .ok_or_else(|| ContentError::validation("shops.json shops", "is required"))?;

        let mut shops = IndexMap::new();
        for (id, payload) in id_mapping(shops_raw, "shops.json shops")? {
            let entry = SCHEMA.check(id, payload)?;
            let embedded = entry.str("id")?;
            if embedded != id {
                return Err(ContentError::validation(
                    entry.field_context("id"),
                    format!("must match its key, got '{embedded}'"),
                ));
            }
            let shop_type: ShopType = entry.one_of("shop_type", &ShopType::NAMES)?;

            let mut seen = HashSet::new();
            let mut stock_pool = Vec::new();
            for (index, raw_stock) in entry.list_or_empty("stock_pool")?.iter().enumerate() {
                let context = format!("{}[{index}]", entry.field_context("stock_pool"));
                let stock = STOCK.check_in(context, raw_stock)?;
                let stock_id = stock.str("id")?;
                if !seen.insert(stock_id) {
                    return Err(ContentError::validation(
                        entry.field_context("stock_pool"),
                        format!("lists '{stock_id}' more than once"),
                    ));
                }
                if !self.stocks(shop_type, stock_id)? {
                    return Err(ContentError::reference(
                        stock.context(),
                        stock_target(shop_type),
                        stock_id,
                    ));
                }
                stock_pool.push(ShopStockEntryDef {
                    id: stock_id.to_string(),
                    qty: stock.positive("qty")?,
                });
            }

            let shop = ShopDef {
                id: id.to_string(),
                name: entry.str("name")?.to_string(),
                shop_type,
                tags: entry.str_list("tags")?,
                stock_pool,
                stock_size: entry.positive_or("stock_size", DEFAULT_STOCK_SIZE)?,
            };
            shops.insert(id.to_string(), shop);
        }
        Ok(shops)
    }
}

pub type ShopsRepository = Repository<ShopTable>;

impl Repository<ShopTable> {
    pub fn new(
        definitions_dir: impl Into<PathBuf>,
        items: Arc<ItemsRepository>,
        weapons: Arc<WeaponsRepository>,
        armour: Arc<ArmourRepository>,
    ) -> Self {
        Self::with_table(ShopTable::new(items, weapons, armour), definitions_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::testing::write_json;
    use serde_json::json;

    fn fixture(shops: Value) -> (tempfile::TempDir, ShopsRepository) {
        let dir = tempfile::tempdir().unwrap();
        write_json(
            dir.path(),
            "items.json",
            json!({"potion": {"name": "Potion", "kind": "consumable", "value": 10}}),
        );
        write_json(
            dir.path(),
            "weapons.json",
            json!({"iron_sword": {"name": "Iron Sword", "attack": 5, "value": 20}}),
        );
        write_json(
            dir.path(),
            "armour.json",
            json!({"leather_vest": {"name": "Leather Vest", "slot": "body", "defense": 3, "value": 15}}),
        );
        write_json(dir.path(), "shops.json", json!({"shops": shops}));
        let repo = ShopsRepository::new(
            dir.path(),
            Arc::new(ItemsRepository::new(dir.path())),
            Arc::new(WeaponsRepository::new(dir.path())),
            Arc::new(ArmourRepository::new(dir.path())),
        );
        (dir, repo)
    }

    #[test]
    fn stock_resolves_against_shop_type() {
        let (_dir, repo) = fixture(json!({
            "smithy": {"id": "smithy", "name": "Smithy", "shop_type": "weapon",
                       "stock_pool": [{"id": "iron_sword", "qty": 2}]},
            "apothecary": {"id": "apothecary", "name": "Apothecary", "shop_type": "item",
                           "tags": ["town"], "stock_pool": [{"id": "potion", "qty": 5}],
                           "stock_size": 4}
        }));
        let smithy = repo.get("smithy").unwrap();
        assert_eq!(smithy.shop_type, ShopType::Weapon);
        assert_eq!(smithy.stock_size, DEFAULT_STOCK_SIZE);
        assert_eq!(smithy.stock_pool[0].qty, 2);
        assert_eq!(repo.get("apothecary").unwrap().stock_size, 4);
    }

    #[test]
    fn stock_from_wrong_table_is_reference_failure() {
        let (_dir, repo) = fixture(json!({
            "smithy": {"id": "smithy", "name": "Smithy", "shop_type": "armour",
                       "stock_pool": [{"id": "iron_sword", "qty": 1}]}
        }));
        let err = repo.all().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Reference);
        assert_eq!(
            err.to_string(),
            "shop 'smithy' stock_pool[0] references missing armour 'iron_sword'"
        );
    }

    #[test]
    fn duplicate_stock_is_validation_failure() {
        let (_dir, repo) = fixture(json!({
            "apothecary": {"id": "apothecary", "name": "A", "shop_type": "item",
                           "stock_pool": [{"id": "potion", "qty": 1}, {"id": "potion", "qty": 2}]}
        }));
        let err = repo.all().unwrap_err();
        assert_eq!(
            err.to_string(),
            "shop 'apothecary' stock_pool lists 'potion' more than once"
        );
    }

    #[test]
    fn zero_stock_size_and_mismatched_id_are_rejected() {
        let (_dir, repo) = fixture(json!({
            "a": {"id": "a", "name": "A", "shop_type": "item", "stock_size": 0}
        }));
        assert_eq!(
            repo.all().unwrap_err().to_string(),
            "shop 'a' stock_size must be positive"
        );

        let (_dir, repo) = fixture(json!({"a": {"id": "b", "name": "A", "shop_type": "item"}}));
        assert_eq!(repo.all().unwrap_err().kind(), ErrorKind::Validation);
    }
}
