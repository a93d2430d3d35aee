//! Death message flavour text. Every word is drawn from a generator seeded
//! with the server's entropy, so any client can rebuild the same message
//! later from the seed alone.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::{DamageType, ObituaryKind, WorldDamage};

const NORMAL: &[&str] = &[
    "ANNIHILATED",
    "BLASTED",
    "BODIED",
    "CLAPPED",
    "DECKED",
    "DELETED",
    "DROPPED",
    "ERASED",
    "EVICTED",
    "FLATTENED",
    "FOLDED",
    "FRAGGED",
    "HUMBLED",
    "JUMPED",
    "LAID OUT",
    "MELTED",
    "MUGGED",
    "NUKED",
    "OUTPLAYED",
    "PANCAKED",
    "POPPED",
    "RATTLED",
    "RETIRED",
    "SCRAPPED",
    "SMOKED",
    "SNUFFED",
    "SPLATTERED",
    "TOASTED",
    "TRASHED",
    "UNPLUGGED",
    "WRECKED",
    "ZAPPED",
];

const PREFIXES: &[&str] = &[
    "ANTI",
    "BI",
    "CRYPTO",
    "DOUBLE",
    "EX",
    "HYPER",
    "MEGA",
    "MICRO",
    "MULTI",
    "NEO",
    "OMNI",
    "OVER",
    "PROTO",
    "QUASI",
    "RE",
    "SEMI",
    "SUPER",
    "TRI",
    "ULTRA",
    "UN",
];

const SUICIDE_PREFIXES: &[&str] = &["AUTO", "SELF", "SHANKS", "SOLO", "TIMMA"];

const VOID: &[&str] = &["ATE", "HOLED", "RECLAIMED", "TOOK"];

const SPIKE: &[&str] = &[
    "DISEMBOWELED",
    "GORED",
    "IMPALED",
    "PERFORATED",
    "POKED",
    "SKEWERED",
    "SLASHED",
];

const CONJUNCTIONS: &[&str] = &[
    "+",
    "&",
    "&&",
    "ALONG WITH",
    "AND",
    "AS WELL AS",
    "ASSISTED BY",
    "FEAT.",
    "N'",
    "PLUS",
    "UND",
    "W/",
    "WITH",
    "X",
];

pub fn obituary_rng(entropy: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(entropy)
}

fn pick<R: Rng>(rng: &mut R, words: &'static [&'static str]) -> &'static str {
    words[rng.gen_range(0..words.len())]
}

fn maybe_prefix<R: Rng>(rng: &mut R, probability: f64) -> &'static str {
    if !rng.gen_bool(probability) {
        return "";
    }
    pick(rng, PREFIXES)
}

fn words_for(damage: DamageType) -> &'static [&'static str] {
    if damage.is_world(WorldDamage::Void) {
        VOID
    } else if damage.is_world(WorldDamage::Spike) {
        SPIKE
    } else {
        NORMAL
    }
}

/// Builds the obituary word. Draws happen in a fixed order: suicide prefix,
/// rare prefix, common prefix, then the word itself.
pub fn compose<R: Rng>(rng: &mut R, kind: ObituaryKind, damage: DamageType) -> String {
    let words = words_for(damage);

    let prefix1 = if kind == ObituaryKind::Suicide {
        pick(rng, SUICIDE_PREFIXES)
    } else {
        ""
    };
    let prefix2 = maybe_prefix(rng, 0.05);
    let prefix3 = maybe_prefix(rng, 0.5);
    let word = pick(rng, words);

    format!("{prefix1}{prefix2}{prefix3}{word}")
}

/// Joins attacker and assistor names. Drawn after [`compose`] from the
/// same generator.
pub fn conjunction<R: Rng>(rng: &mut R) -> &'static str {
    pick(rng, CONJUNCTIONS)
}

/// Convenience for rebuilding a message from its seed alone.
pub fn compose_seeded(entropy: u64, kind: ObituaryKind, damage: DamageType) -> String {
    compose(&mut obituary_rng(entropy), kind, damage)
}

/// Word shown when aiming at a player through a scope. Changes once a
/// second.
pub fn scope_taunt(now: i64) -> &'static str {
    let mut rng = obituary_rng((now / 1000) as u64);
    pick(&mut rng, NORMAL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weapon::WeaponType;

    #[test]
    fn same_seed_same_words() {
        let damage = DamageType::weapon(WeaponType::Electrobolt);
        for entropy in [1u64, 77, 0xdead_beef, u64::MAX] {
            let a = compose_seeded(entropy, ObituaryKind::Normal, damage);
            let b = compose_seeded(entropy, ObituaryKind::Normal, damage);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn suicides_always_get_a_prefix() {
        let damage = DamageType::weapon(WeaponType::RocketLauncher);
        for entropy in 1..64u64 {
            let word = compose_seeded(entropy, ObituaryKind::Suicide, damage);
            assert!(
                SUICIDE_PREFIXES.iter().any(|p| word.starts_with(p)),
                "{word}"
            );
        }
    }

    #[test]
    fn world_deaths_use_their_own_words() {
        let void = DamageType::world(WorldDamage::Void);
        let spike = DamageType::world(WorldDamage::Spike);
        for entropy in 1..64u64 {
            let word = compose_seeded(entropy, ObituaryKind::Accident, void);
            assert!(VOID.iter().any(|w| word.ends_with(w)), "{word}");
            let word = compose_seeded(entropy, ObituaryKind::Accident, spike);
            assert!(SPIKE.iter().any(|w| word.ends_with(w)), "{word}");
        }
    }

    #[test]
    fn conjunction_follows_the_word() {
        let damage = DamageType::weapon(WeaponType::Machinegun);
        let mut a = obituary_rng(9);
        let mut b = obituary_rng(9);
        assert_eq!(compose(&mut a, ObituaryKind::Normal, damage), compose(&mut b, ObituaryKind::Normal, damage));
        assert_eq!(conjunction(&mut a), conjunction(&mut b));
    }

    // Recorded messages are rebuilt from their entropy on every client, so
    // the draw order and generator output must not drift between builds.
    #[test]
    fn known_seeds_compose_known_words() {
        let rail = DamageType::weapon(WeaponType::Electrobolt);
        let void = DamageType::world(WorldDamage::Void);

        assert_eq!(compose_seeded(1, ObituaryKind::Normal, rail), "EXFLATTENED");
        assert_eq!(compose_seeded(1234, ObituaryKind::Normal, rail), "PANCAKED");
        assert_eq!(compose_seeded(1234, ObituaryKind::Suicide, rail), "SELFOVERDELETED");
        assert_eq!(compose_seeded(99, ObituaryKind::Suicide, rail), "SOLOSEMIRETIRED");
        assert_eq!(compose_seeded(7, ObituaryKind::Accident, void), "RERECLAIMED");

        let mut rng = obituary_rng(7);
        assert_eq!(compose(&mut rng, ObituaryKind::Normal, rail), "RESCRAPPED");
        assert_eq!(conjunction(&mut rng), "N'");
    }
}
