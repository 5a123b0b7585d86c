//! The dungeon shop: two fixed wares, priced from [`ShopConfig`].

use super::types::Player;
use crate::config::ShopConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopItem {
    /// Item A: raises attack.
    SharpenedBlade,
    /// Item B: raises max hp and tops hp up by the same amount.
    VitalityTonic,
}

impl ShopItem {
    pub fn name(self) -> &'static str {
        match self {
            ShopItem::SharpenedBlade => "Sharpened Blade",
            ShopItem::VitalityTonic => "Vitality Tonic",
        }
    }

    pub fn price(self, cfg: &ShopConfig) -> i32 {
        match self {
            ShopItem::SharpenedBlade => cfg.blade_price,
            ShopItem::VitalityTonic => cfg.tonic_price,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Purchase {
    Bought { item: ShopItem, price: i32 },
    NotEnoughGold { item: ShopItem, price: i32, gold: i32 },
}

pub fn buy(p: &mut Player, item: ShopItem, cfg: &ShopConfig) -> Purchase {
    let price = item.price(cfg);
    if p.gold < price {
        return Purchase::NotEnoughGold {
            item,
            price,
            gold: p.gold,
        };
    }
    p.gold -= price;
    match item {
        ShopItem::SharpenedBlade => p.attack += cfg.blade_attack,
        ShopItem::VitalityTonic => {
            p.max_hp += cfg.tonic_max_hp;
            p.heal(cfg.tonic_max_hp);
        }
    }
    Purchase::Bought { item, price }
}

/// One-line price list for the shop view.
pub fn price_list(cfg: &ShopConfig) -> String {
    format!(
        "BA) {} +{} ATK {}g  BB) {} +{} MaxHP {}g",
        ShopItem::SharpenedBlade.name(),
        cfg.blade_attack,
        cfg.blade_price,
        ShopItem::VitalityTonic.name(),
        cfg.tonic_max_hp,
        cfg.tonic_price
    )
}
