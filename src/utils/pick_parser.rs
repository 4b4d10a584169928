use crate::models::{Bet, Direction};
use regex::{Captures, Regex};
use std::sync::LazyLock;

// Unsigned ASCII decimal: "228.5", "150", "7.", ".5"
const NUMBER: &str = r"(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)";

static RE_TOTAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?i)^(Over|Under)\s+({NUMBER})$")).unwrap());
static RE_MONEYLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(.+?)\s+ML$").unwrap());
static RE_SPREAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"^(.+?)\s+([+-]{NUMBER})$")).unwrap());

type Matcher = fn(&Captures) -> Option<Bet>;

/// Ordered grammar; the first pattern that matches decides the bet type
static GRAMMAR: LazyLock<[(&'static Regex, Matcher); 3]> = LazyLock::new(|| {
    [
        (&*RE_TOTAL, total as Matcher),
        (&*RE_MONEYLINE, moneyline as Matcher),
        (&*RE_SPREAD, spread as Matcher),
    ]
});

fn total(caps: &Captures) -> Option<Bet> {
    let direction = if caps[1].eq_ignore_ascii_case("over") {
        Direction::Over
    } else {
        Direction::Under
    };
    Some(Bet::Total {
        direction,
        number: caps[2].parse().ok()?,
    })
}

fn moneyline(caps: &Captures) -> Option<Bet> {
    Some(Bet::Moneyline {
        team: caps[1].trim().to_string(),
    })
}

fn spread(caps: &Captures) -> Option<Bet> {
    Some(Bet::Spread {
        team: caps[1].trim().to_string(),
        line: caps[2].parse().ok()?,
    })
}

/// Parse a pick string such as "Knicks -2.5", "Over 228.5" or "Knicks ML"
///
/// Returns `None` when no pattern matches; callers must not guess.
pub fn parse_pick(pick: &str) -> Option<Bet> {
    let pick = pick.trim();
    GRAMMAR
        .iter()
        .find_map(|(re, matcher)| re.captures(pick).and_then(|caps| matcher(&caps)))
}
