use ricochet::Team;
use ricochet::obituary::Gadget;

use crate::snapshot::{BombProgress, MatchState, NOT_CHASING, Perk, RoundType, StaminaState};

/// Named numbers layouts can compare snapshot fields against.
pub const NUMERIC_CONSTANTS: &[(&str, f64)] = &[
    ("NOT_CHASING", NOT_CHASING as f64),
    ("TEAM_SPECTATOR", Team::Spectator as u8 as f64),
    ("TEAM_PLAYERS", Team::Players as u8 as f64),
    ("TEAM_ALPHA", Team::Alpha as u8 as f64),
    ("TEAM_BETA", Team::Beta as u8 as f64),
    ("Gadget_None", Gadget::None as u8 as f64),
    ("Gadget_ThrowingAxe", Gadget::ThrowingAxe as u8 as f64),
    ("Gadget_SuicideBomb", Gadget::SuicideBomb as u8 as f64),
    ("Gadget_StunGrenade", Gadget::StunGrenade as u8 as f64),
    ("Perk_Ninja", Perk::Ninja as u8 as f64),
    ("Perk_Hooligan", Perk::Hooligan as u8 as f64),
    ("Perk_Midget", Perk::Midget as u8 as f64),
    ("Perk_Jetpack", Perk::Jetpack as u8 as f64),
    ("Perk_Boomer", Perk::Boomer as u8 as f64),
    ("Stamina_Normal", StaminaState::Normal as u8 as f64),
    ("Stamina_Reloading", StaminaState::Reloading as u8 as f64),
    ("Stamina_UsingAbility", StaminaState::UsingAbility as u8 as f64),
    ("Stamina_UsedAbility", StaminaState::UsedAbility as u8 as f64),
    ("MatchState_Warmup", MatchState::Warmup as u8 as f64),
    ("MatchState_Countdown", MatchState::Countdown as u8 as f64),
    ("MatchState_Playing", MatchState::Playing as u8 as f64),
    ("MatchState_PostMatch", MatchState::PostMatch as u8 as f64),
    ("MatchState_WaitExit", MatchState::WaitExit as u8 as f64),
    ("BombProgress_Nothing", BombProgress::Nothing as u8 as f64),
    ("BombProgress_Planting", BombProgress::Planting as u8 as f64),
    ("BombProgress_Defusing", BombProgress::Defusing as u8 as f64),
    ("RoundType_Normal", RoundType::Normal as u8 as f64),
    ("RoundType_MatchPoint", RoundType::MatchPoint as u8 as f64),
    ("RoundType_Overtime", RoundType::Overtime as u8 as f64),
    ("RoundType_OvertimeMatchPoint", RoundType::OvertimeMatchPoint as u8 as f64),
];

pub fn constant(name: &str) -> Option<f64> {
    NUMERIC_CONSTANTS
        .iter()
        .find(|(constant, _)| *constant == name)
        .map(|(_, value)| *value)
}
