//! Text view of a session: status line, enemy bar, story, options.

use super::types::{Action, GameState, Session};

pub fn status_line(s: &Session) -> String {
    let p = &s.player;
    format!(
        "L{} HP{}/{} ATK{} XP{}/{} G{}",
        p.level,
        p.hp,
        p.max_hp,
        p.attack,
        p.xp,
        p.xp_to_next(),
        p.gold
    )
}

/// Ten-cell ASCII bar, e.g. `[#####-----]`.
pub fn bar(ratio: f32) -> String {
    let filled = (ratio.clamp(0.0, 1.0) * 10.0).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(10 - filled))
}

pub fn options_line(s: &Session) -> String {
    let opts: Vec<&str> = Action::available_in(s.state)
        .iter()
        .map(|a| a.alias())
        .collect();
    format!("Opts: {} ? Q", opts.join(" "))
}

pub fn render(s: &Session) -> String {
    let mut msg = String::new();
    msg.push_str(&status_line(s));
    msg.push('\n');
    if let (GameState::Fight, Some(e)) = (s.state, s.enemy.as_ref()) {
        msg.push_str(&format!(
            "{} HP{}/{} {}\n",
            e.name,
            e.hp.max(0),
            e.max_hp,
            bar(e.hp_ratio())
        ));
    }
    msg.push_str(&s.story);
    msg.push('\n');
    if s.state == GameState::GameOver {
        msg.push_str(&format!(
            "GAME OVER - turn {}, level {}, {} slain, {} gold.\n",
            s.turn, s.player.level, s.stats.monsters_slain, s.player.gold
        ));
    }
    msg.push_str(&options_line(s));
    msg.push('\n');
    msg
}

pub fn help_text() -> &'static str {
    "Dungeon Door Commands:\n\
X)plore - venture deeper (monster, treasure, trap or a quiet alcove)\n\
R)est - recover a fifth of max HP (something may find you)\n\
S)hop - visit the merchant; BA buys the blade, BB the tonic, B)ack leaves\n\
A)ttack - trade blows with the enemy; RUN - try to flee (may be hit)\n\
RESET - start over; ? - this help; Q - save and quit"
}
