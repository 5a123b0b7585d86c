//! Turn resolution for fights, fleeing, and level progression.

use rand::rngs::StdRng;
use rand::Rng;

use super::types::{Enemy, Player};

/// What happened during one exchange of blows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The enemy dropped; rewards already applied to the player.
    EnemyDefeated {
        dealt: i32,
        xp: i32,
        gold: i32,
        leveled_up: bool,
    },
    /// Both sides still standing.
    Exchange { dealt: i32, taken: i32 },
    /// The counter-attack took the player to 0 hp.
    PlayerDefeated { dealt: i32, taken: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FleeOutcome {
    Escaped,
    Caught { taken: i32 },
    CaughtAndKilled { taken: i32 },
}

/// uniform(attack-5, attack+5), never negative.
pub fn roll_player_damage(attack: i32, rng: &mut StdRng) -> i32 {
    rng.gen_range((attack - 5)..=(attack + 5)).max(0)
}

/// uniform(damage-2, damage+2), never negative.
pub fn roll_enemy_damage(damage: i32, rng: &mut StdRng) -> i32 {
    rng.gen_range((damage - 2)..=(damage + 2)).max(0)
}

pub fn roll_loot_gold(rng: &mut StdRng) -> i32 {
    rng.gen_range(10..=30)
}

/// Level up at most once if `xp >= level * 50`; the excess carries over.
pub fn try_level_up(p: &mut Player) -> bool {
    let need = p.xp_to_next();
    if p.xp < need {
        return false;
    }
    p.xp -= need;
    p.level += 1;
    p.max_hp += 10;
    p.attack += 5;
    p.hp = p.max_hp;
    true
}

/// Add xp and run a single level-up check.
pub fn award_xp(p: &mut Player, xp: i32) -> bool {
    p.xp += xp.max(0);
    try_level_up(p)
}

fn counter_attack(player: &mut Player, enemy: &Enemy, rng: &mut StdRng) -> i32 {
    let dmg = roll_enemy_damage(enemy.damage, rng);
    player.take_damage(dmg)
}

/// Player strikes first; a surviving enemy strikes back.
pub fn attack_turn(player: &mut Player, enemy: &mut Enemy, rng: &mut StdRng) -> TurnOutcome {
    let dealt = roll_player_damage(player.attack, rng);
    enemy.hp -= dealt;
    if enemy.is_defeated() {
        let xp = enemy.xp_reward;
        let gold = roll_loot_gold(rng);
        player.gold += gold;
        let leveled_up = award_xp(player, xp);
        return TurnOutcome::EnemyDefeated {
            dealt,
            xp,
            gold,
            leveled_up,
        };
    }
    let taken = counter_attack(player, enemy, rng);
    if player.is_dead() {
        TurnOutcome::PlayerDefeated { dealt, taken }
    } else {
        TurnOutcome::Exchange { dealt, taken }
    }
}

/// Escape with probability `chance`; otherwise eat one counter-attack.
pub fn attempt_flee(
    player: &mut Player,
    enemy: &Enemy,
    chance: f64,
    rng: &mut StdRng,
) -> FleeOutcome {
    if rng.gen_bool(chance.clamp(0.0, 1.0)) {
        return FleeOutcome::Escaped;
    }
    let taken = counter_attack(player, enemy, rng);
    if player.is_dead() {
        FleeOutcome::CaughtAndKilled { taken }
    } else {
        FleeOutcome::Caught { taken }
    }
}
