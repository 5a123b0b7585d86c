//! The game state machine.
//!
//! [`Dungeon`] holds the immutable rules (balance config and the encounter table);
//! a [`Session`] holds everything that changes. [`Dungeon::handle_action`] applies one
//! user action to a session, updates the story line, and advances the turn counter.
//!
//! | state      | accepted actions                      |
//! |------------|---------------------------------------|
//! | explore    | Explore, Rest, GotoShop, Reset        |
//! | fight      | Fight, Flee, Reset                    |
//! | shop       | BuyItemA, BuyItemB, GotoExplore, Reset|
//! | game over  | Reset                                 |
//!
//! Anything else is rejected with [`GameError::ActionUnavailable`] and the session is
//! left untouched.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::Rng;

use super::combat::{self, FleeOutcome, TurnOutcome};
use super::encounter::{random_monster, Encounter, EncounterTable};
use super::errors::GameError;
use super::shop::{self, Purchase, ShopItem};
use super::types::{Action, GameState, Session};
use crate::config::GameConfig;

pub struct Dungeon {
    config: GameConfig,
    encounters: EncounterTable,
}

impl Dungeon {
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        let encounters = EncounterTable::new(&config.encounters)?;
        config
            .validate()
            .map_err(|e| GameError::InvalidConfig(e.to_string()))?;
        Ok(Dungeon { config, encounters })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    fn next_seed(&self) -> u64 {
        self.config
            .seed
            .unwrap_or_else(|| rand::thread_rng().gen::<u64>())
    }

    /// Fresh session at the configured starting stats.
    pub fn new_session(&self) -> Session {
        Session::new(&self.config.start, self.next_seed())
    }

    pub fn new_session_with_seed(&self, seed: u64) -> Session {
        Session::new(&self.config.start, seed)
    }

    pub fn handle_action(&self, session: &mut Session, action: Action) -> Result<(), GameError> {
        if !Action::available_in(session.state).contains(&action) {
            return Err(GameError::ActionUnavailable {
                action,
                state: session.state,
            });
        }
        debug!(
            "turn {} action={} state={}",
            session.turn, action, session.state
        );
        if action == Action::Reset {
            session.reset(&self.config.start, self.next_seed());
            info!("session reset (seed {})", session.seed);
            return Ok(());
        }

        let mut rng = session.turn_rng();
        match action {
            Action::Explore => self.explore(session, &mut rng),
            Action::Rest => self.rest(session, &mut rng),
            Action::GotoShop => {
                session.state = GameState::Shop;
                session.story = format!(
                    "A hooded merchant unrolls a mat of wares. {}",
                    shop::price_list(&self.config.shop)
                );
            }
            Action::Fight => self.fight(session, &mut rng),
            Action::Flee => self.flee(session, &mut rng),
            Action::BuyItemA => self.buy(session, ShopItem::SharpenedBlade),
            Action::BuyItemB => self.buy(session, ShopItem::VitalityTonic),
            Action::GotoExplore => {
                session.state = GameState::Explore;
                session.story = "You leave the merchant and head back into the dark.".into();
            }
            Action::Reset => {}
        }

        session.turn = session.turn.saturating_add(1);
        session.stats.turns = session.stats.turns.saturating_add(1);
        if session.state == GameState::GameOver {
            info!(
                "game over on turn {} at level {} ({} slain)",
                session.turn, session.player.level, session.stats.monsters_slain
            );
        }
        Ok(())
    }

    fn explore(&self, s: &mut Session, rng: &mut StdRng) {
        if s.player.is_dead() {
            s.state = GameState::GameOver;
            s.story = "Your wounds are too deep to go on. The dungeon claims you.".into();
            return;
        }
        match self.encounters.roll(rng) {
            Encounter::Monster => {
                let enemy = random_monster(rng).spawn(s.player.level, self.config.scale_with_level);
                s.story = format!(
                    "A {} (HP {}) lunges out of the shadows!",
                    enemy.name, enemy.hp
                );
                s.enemy = Some(enemy);
                s.state = GameState::Fight;
            }
            Encounter::Treasure => {
                let gold = rng.gen_range(10..=50);
                s.player.gold += gold;
                s.stats.gold_earned += gold;
                s.story = format!("You pry open a forgotten chest and find {} gold.", gold);
            }
            Encounter::Trap => {
                let dmg = rng.gen_range(5..=15);
                let lost = s.player.take_damage(dmg);
                if s.player.is_dead() {
                    s.state = GameState::GameOver;
                    s.story = format!(
                        "A hidden blade springs from the wall for {} damage. You fall.",
                        lost
                    );
                } else {
                    s.story = format!("Click. A hidden blade springs from the wall: -{} HP.", lost);
                }
            }
            Encounter::Rest => {
                let gained = s.player.heal(rng.gen_range(10..=20));
                s.story = format!("You find a quiet alcove and catch your breath (+{} HP).", gained);
            }
        }
    }

    fn rest(&self, s: &mut Session, rng: &mut StdRng) {
        let gained = s.player.heal(s.player.max_hp / 5);
        if rng.gen_bool(self.config.rest_ambush_chance) {
            let enemy = random_monster(rng).spawn(s.player.level, self.config.scale_with_level);
            s.story = format!(
                "You doze (+{} HP) and wake to a {} (HP {}) standing over you!",
                gained, enemy.name, enemy.hp
            );
            s.enemy = Some(enemy);
            s.state = GameState::Fight;
        } else {
            s.story = format!("You rest against the cold stone (+{} HP).", gained);
        }
    }

    fn fight(&self, s: &mut Session, rng: &mut StdRng) {
        let Some(enemy) = s.enemy.as_mut() else {
            // A fight state without an enemy can only come from a hand-edited save.
            s.state = GameState::Explore;
            s.story = "Nothing stirs. Whatever was here is gone.".into();
            return;
        };
        let name = enemy.name.clone();
        match combat::attack_turn(&mut s.player, enemy, rng) {
            TurnOutcome::EnemyDefeated {
                dealt,
                xp,
                gold,
                leveled_up,
            } => {
                s.enemy = None;
                s.state = GameState::Explore;
                s.stats.monsters_slain += 1;
                s.stats.gold_earned += gold;
                let mut story = format!(
                    "You hit the {} for {} and it falls! (+{} XP, +{} gold)",
                    name, dealt, xp, gold
                );
                if leveled_up {
                    info!("level up: now level {}", s.player.level);
                    story.push_str(&format!(
                        " Level up! You are now level {}.",
                        s.player.level
                    ));
                }
                s.story = story;
            }
            TurnOutcome::Exchange { dealt, taken } => {
                s.story = format!(
                    "You hit the {} for {}. It strikes back for {}.",
                    name, dealt, taken
                );
            }
            TurnOutcome::PlayerDefeated { dealt, taken } => {
                s.enemy = None;
                s.state = GameState::GameOver;
                s.story = format!(
                    "You hit the {} for {}, but it strikes you down for {}. Game over.",
                    name, dealt, taken
                );
            }
        }
    }

    fn flee(&self, s: &mut Session, rng: &mut StdRng) {
        let Some(enemy) = s.enemy.as_ref() else {
            s.state = GameState::Explore;
            s.story = "You run, but nothing follows.".into();
            return;
        };
        let name = enemy.name.clone();
        match combat::attempt_flee(&mut s.player, enemy, self.config.flee_chance, rng) {
            FleeOutcome::Escaped => {
                s.enemy = None;
                s.state = GameState::Explore;
                s.stats.times_fled += 1;
                s.story = format!("You slip away from the {}.", name);
            }
            FleeOutcome::Caught { taken } => {
                s.story = format!("The {} cuts off your escape and hits you for {}.", name, taken);
            }
            FleeOutcome::CaughtAndKilled { taken } => {
                s.enemy = None;
                s.state = GameState::GameOver;
                s.story = format!(
                    "The {} catches you as you turn to run ({} damage). Game over.",
                    name, taken
                );
            }
        }
    }

    fn buy(&self, s: &mut Session, item: ShopItem) {
        s.story = match shop::buy(&mut s.player, item, &self.config.shop) {
            Purchase::Bought { item, price } => {
                format!("You buy the {} for {} gold.", item.name(), price)
            }
            Purchase::NotEnoughGold { item, price, gold } => format!(
                "The {} costs {} gold; you only have {}.",
                item.name(),
                price,
                gold
            ),
        };
    }
}
