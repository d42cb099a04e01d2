//! Shared fixtures for content integration tests.
#![allow(dead_code)]

use std::path::Path;

use serde_json::{Value, json};
use tempfile::TempDir;

pub fn write_json(dir: &Path, file: &str, value: Value) {
    let path = dir.join(file);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, serde_json::to_string_pretty(&value).unwrap()).unwrap();
}

/// A small but complete definitions directory in which every reference
/// resolves. Tests overwrite single files to break it.
pub fn valid_content() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    write_json(
        root,
        "weapons.json",
        json!({
            "iron_sword": {"name": "Iron Sword", "attack": 5, "value": 20, "tags": ["sword"]},
            "ash_staff": {"name": "Ash Staff", "attack": 2, "value": 10}
        }),
    );
    write_json(
        root,
        "armour.json",
        json!({
            "leather_vest": {"name": "Leather Vest", "slot": "body", "defense": 3, "value": 15},
            "iron_helm": {"name": "Iron Helm", "slot": "head", "defense": 2, "value": 12}
        }),
    );
    write_json(
        root,
        "items.json",
        json!({
            "potion": {"name": "Potion", "kind": "consumable", "value": 10, "heal_hp": 20},
            "goblin_ear": {"name": "Goblin Ear", "kind": "material", "value": 1}
        }),
    );
    write_json(
        root,
        "skills.json",
        json!({
            "slash": {
                "name": "Slash", "description": "A quick cut.", "tags": ["physical"],
                "required_weapon_tags": ["sword"], "target_mode": "single_enemy",
                "max_targets": 1, "mp_cost": 0, "base_power": 4, "effect_type": "damage",
                "gold_value": 10
            }
        }),
    );
    write_json(
        root,
        "summons.json",
        json!({
            "sprite": {
                "name": "Sprite", "max_hp": 10, "max_mp": 5, "attack": 2, "defense": 1,
                "speed": 10, "bond_cost": 1
            }
        }),
    );
    write_json(
        root,
        "enemies.json",
        json!({
            "goblin_grunt": {
                "name": "Goblin Grunt", "hp": 10, "mp": 0, "attack": 3, "defense": 1,
                "speed": 6, "rewards_exp": 3, "rewards_gold": 2, "tags": ["goblin"],
                "equipment": {"weapons": ["iron_sword"], "armour": "leather_vest"}
            },
            "goblin_pack": {"name": "Goblin Pack", "enemy_ids": ["goblin_grunt", "goblin_grunt"], "tags": []}
        }),
    );
    write_json(
        root,
        "classes.json",
        json!({
            "warrior": {
                "name": "Warrior", "base_hp": 30, "base_mp": 10, "speed": 5,
                "starting_weapon": "iron_sword", "starting_armour": "leather_vest",
                "known_summons": ["sprite"], "default_equipped_summons": ["sprite"]
            }
        }),
    );
    write_json(
        root,
        "party_members.json",
        json!({
            "ana": {
                "name": "Ana", "base_stats": {"max_hp": 20, "max_mp": 12, "speed": 7},
                "equipment": {"weapons": ["ash_staff"], "armour": {"body": "leather_vest", "head": "iron_helm"}}
            }
        }),
    );
    write_json(root, "story/index.json", json!({"chapters": ["one.json", "two.json"]}));
    write_json(
        root,
        "story/chapters/one.json",
        json!({
            "start": {"text": "It begins.", "next": "fork"},
            "fork": {"text": "Which way?", "choices": [
                {"label": "Left", "next": "end"},
                {"label": "Right", "next": "end", "effects": [{"type": "set_flag", "flag": "went_right"}]}
            ]}
        }),
    );
    write_json(root, "story/chapters/two.json", json!({"end": {"text": "The end."}}));
    write_json(
        root,
        "areas.json",
        json!({"areas": [
            {"id": "town", "name": "Town", "description": "Home.", "tags": ["town"],
             "connections": [{"to": "woods", "label": "Out"}]},
            {"id": "woods", "name": "Woods", "description": "Trees.", "tags": ["wild"],
             "connections": [{"to": "town", "label": "Back"}]}
        ]}),
    );
    write_json(
        root,
        "floors.json",
        json!({
            "f1": {"name": "First Floor", "level": 1, "starting_location_id": "square", "boss_location_id": "den"}
        }),
    );
    write_json(
        root,
        "locations.json",
        json!({
            "square": {
                "name": "Square", "description": "Cobbles.", "floor_id": "f1", "type": "town",
                "tags": ["town"], "connections": [{"to": "den", "label": "Den"}],
                "npcs_present": [{"npc_id": "elder", "talk_node_id": "start"}]
            },
            "den": {
                "name": "Goblin Den", "description": "Smells.", "floor_id": "f1", "type": "boss",
                "tags": ["cave"], "connections": [{"to": "square", "label": "Leave"}]
            }
        }),
    );
    write_json(
        root,
        "quests.json",
        json!({"quests": {
            "ears": {
                "quest_id": "ears", "name": "Goblin Ears",
                "objectives": [
                    {"type": "collect_item", "label": "Collect ears", "item_id": "goblin_ear", "quantity": 3},
                    {"type": "visit_area", "label": "Find the den", "area_id": "den"}
                ],
                "turn_in": {"node_id": "end"},
                "rewards": {"gold": 5, "items": [{"item_id": "potion"}], "set_flags": {"ears_done": true}}
            }
        }}),
    );
    write_json(
        root,
        "shops.json",
        json!({"shops": {
            "store": {"id": "store", "name": "Store", "shop_type": "item", "stock_pool": [{"id": "potion", "qty": 5}]},
            "smith": {"id": "smith", "name": "Smith", "shop_type": "weapon", "stock_pool": [{"id": "iron_sword", "qty": 1}]}
        }}),
    );
    write_json(
        root,
        "loot_tables.json",
        json!([
            {"id": "goblin_loot", "required_enemy_tags": ["goblin"],
             "drops": [{"item_id": "goblin_ear", "chance": 0.5, "min_qty": 1, "max_qty": 2}]}
        ]),
    );
    write_json(
        root,
        "knowledge.json",
        json!({
            "ana": {"known_enemies": [
                {"enemy_tags": ["goblin"], "revealed_fields": {"hp_range": [8, 12], "behavior": "Cowardly."}}
            ]}
        }),
    );
    write_json(
        root,
        "knowledge_rules.json",
        json!({
            "thresholds": {"tier1_kills": 1, "tier2_kills": 3, "tier3_kills": 10},
            "hp_visibility_by_tier": {"0": "HIDDEN", "1": "HIDDEN", "2": "STATIC_RANGE", "3": "REALTIME"}
        }),
    );

    dir
}
