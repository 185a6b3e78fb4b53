#![allow(dead_code)]

use slotledger::accuracy::CalcMode;
use slotledger::input::SessionInput;
use slotledger::machines::MachineRegistry;
use slotledger::valuation::{evaluate, DerivedRecord};

/// A mid-session start on 新ハナビ used across most tests.
pub fn sample_input() -> SessionInput {
    SessionInput {
        date: "2024-01-15".to_string(),
        machine_name: "新ハナビ".to_string(),
        memo: "evening".to_string(),
        mid_start: true,
        calc_mode: CalcMode::Simple,
        total_games: "3000".to_string(),
        big_count: "10".to_string(),
        reg_count: "8".to_string(),
        start_total_games: "500".to_string(),
        start_big_count: "2".to_string(),
        start_reg_count: "1".to_string(),
        investment: "10000".to_string(),
        recovery: "600".to_string(),
        tech_attempt_count: "20".to_string(),
        tech_miss_count: "3".to_string(),
        mid_success: "5".to_string(),
        mid_miss: "2".to_string(),
        right_success: "4".to_string(),
        right_miss: "1".to_string(),
        watermelon_loss_count: "2".to_string(),
        cherry_loss_count: "3".to_string(),
        other_loss_count: "7".to_string(),
        ..Default::default()
    }
}

/// A record whose medal difference is `recovery - investment / 20`.
pub fn dated_record(date: &str, machine: &str, investment_yen: u32, recovery_medals: u32) -> DerivedRecord {
    let input = SessionInput {
        date: date.to_string(),
        machine_name: machine.to_string(),
        total_games: "1000".to_string(),
        big_count: "4".to_string(),
        reg_count: "2".to_string(),
        investment: investment_yen.to_string(),
        recovery: recovery_medals.to_string(),
        ..Default::default()
    };
    evaluate(input, MachineRegistry::builtin()).expect("fixture input is valid")
}
