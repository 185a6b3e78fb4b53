use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use slotledger::input::SessionInput;
use slotledger::machines::{MachineProfile, MachineRegistry};
use slotledger::stats::NOT_APPLICABLE;
use slotledger::timeline::{ChartPoint, Totals};
use slotledger::valuation::{DerivedRecord, Valuation};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn align_right(table: &mut Table, columns: std::ops::RangeInclusive<usize>) {
    for i in columns {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

fn signed_cell(value: i64) -> Cell {
    let color = if value >= 0 { Color::Green } else { Color::Red };
    Cell::new(value).fg(color)
}

pub fn machines(registry: &MachineRegistry) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Machine").add_attribute(Attribute::Bold),
        Cell::new("Section"),
        Cell::new("Variant"),
        Cell::new("REG max"),
        Cell::new("Tech/miss"),
        Cell::new("Minor A"),
        Cell::new("Minor B"),
        Cell::new("Stages"),
    ]);
    align_right(&mut table, 3..=6);

    for (name, p) in registry.iter() {
        let mut stages = Vec::new();
        if p.detail_fields.mid {
            stages.push("mid");
        }
        if p.detail_fields.right {
            stages.push("right");
        }
        let label = if name == registry.fallback_name() {
            format!("{} (fallback)", name)
        } else {
            name.to_string()
        };

        table.add_row(vec![
            Cell::new(label).add_attribute(Attribute::Bold),
            Cell::new(p.machine_section.to_string()),
            Cell::new(p.detail_variant.to_string()),
            Cell::new(p.reg_max),
            Cell::new(p.tech_loss_per_miss),
            Cell::new(format!("{} {}", p.watermelon_name, p.watermelon_loss)),
            Cell::new(format!("{} {}", p.cherry_name, p.cherry_loss)),
            Cell::new(if stages.is_empty() {
                NOT_APPLICABLE.to_string()
            } else {
                stages.join("+")
            }),
        ]);
    }
    println!("{}", table);
}

pub fn valuation(input: &SessionInput, v: &Valuation, profile: &MachineProfile) {
    let p = &v.stats.personal;
    println!(
        "\n🎰 {} | {} | mode: {}",
        input.machine_name, input.date, input.calc_mode
    );

    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Games").add_attribute(Attribute::Bold),
        Cell::new("BIG"),
        Cell::new("REG"),
        Cell::new("BIG 1/"),
        Cell::new("REG 1/"),
        Cell::new("Combined 1/"),
        Cell::new("Accuracy %"),
    ]);
    table.add_row(vec![
        Cell::new(p.games),
        Cell::new(p.big),
        Cell::new(p.reg),
        Cell::new(p.big_prob.to_string()),
        Cell::new(p.reg_prob.to_string()),
        Cell::new(p.combined_prob.to_string()),
        Cell::new(
            p.tech_accuracy
                .map(|a| a.to_string())
                .unwrap_or_else(|| NOT_APPLICABLE.to_string()),
        ),
    ]);
    align_right(&mut table, 0..=6);
    println!("{}", table);

    let mut loss = new_table();
    loss.add_row(vec![
        Cell::new("Tech misses"),
        Cell::new("Tech loss"),
        Cell::new(format!("{} loss", profile.watermelon_name)),
        Cell::new(format!("{} loss", profile.cherry_name)),
        Cell::new("Other"),
        Cell::new("Total loss").add_attribute(Attribute::Bold),
        Cell::new("Profit (yen)"),
        Cell::new("Diff (medals)"),
    ]);
    loss.add_row(vec![
        Cell::new(v.loss.misses),
        Cell::new(v.loss.tech),
        Cell::new(v.loss.watermelon),
        Cell::new(v.loss.cherry),
        Cell::new(v.loss.other),
        Cell::new(format!("-{}", v.loss.total())).fg(Color::Red),
        signed_cell(v.profit_yen),
        signed_cell(v.medal_diff),
    ]);
    align_right(&mut loss, 0..=7);
    println!("{}", loss);
}

pub fn records(records: &[&DerivedRecord]) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Id"),
        Cell::new("Date").add_attribute(Attribute::Bold),
        Cell::new("Machine"),
        Cell::new("Games"),
        Cell::new("BIG/REG"),
        Cell::new("Combined 1/"),
        Cell::new("Accuracy %"),
        Cell::new("Profit (yen)"),
        Cell::new("Loss"),
        Cell::new("Memo"),
    ]);
    align_right(&mut table, 3..=8);

    for r in records {
        let p = &r.stats.personal;
        table.add_row(vec![
            Cell::new(r.id.as_deref().unwrap_or(NOT_APPLICABLE)),
            Cell::new(r.date()).add_attribute(Attribute::Bold),
            Cell::new(r.machine_name()),
            Cell::new(p.games),
            Cell::new(format!("{}/{}", p.big, p.reg)),
            Cell::new(p.combined_prob.to_string()),
            Cell::new(
                p.tech_accuracy
                    .map(|a| a.to_string())
                    .unwrap_or_else(|| NOT_APPLICABLE.to_string()),
            ),
            signed_cell(r.profit_yen),
            Cell::new(format!("-{}", r.total_loss)).fg(Color::Red),
            Cell::new(&r.input.memo),
        ]);
    }
    println!("{}", table);
    println!("{} records", records.len());
}

pub fn chart(series: &[ChartPoint]) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Date").add_attribute(Attribute::Bold),
        Cell::new("Diff"),
        Cell::new("Cumulative").fg(Color::Cyan),
        Cell::new("Loss"),
    ]);
    align_right(&mut table, 1..=3);

    for point in series {
        table.add_row(vec![
            Cell::new(&point.date).add_attribute(Attribute::Bold),
            signed_cell(point.per_session_medal_diff),
            Cell::new(point.cumulative_medal_diff).fg(Color::Cyan),
            Cell::new(point.loss),
        ]);
    }
    println!("{}", table);
}

pub fn totals(per_machine: &[(String, Totals)], overall: &Totals) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Machine").add_attribute(Attribute::Bold),
        Cell::new("Records"),
        Cell::new("Profit (yen)"),
        Cell::new("Loss"),
        Cell::new("Games"),
        Cell::new("BIG"),
        Cell::new("REG"),
    ]);
    align_right(&mut table, 1..=6);

    let rows = per_machine
        .iter()
        .map(|(name, t)| (name.as_str(), t, false))
        .chain(std::iter::once(("TOTAL", overall, true)));

    for (name, t, bold) in rows {
        let mut label = Cell::new(name);
        if bold {
            label = label.add_attribute(Attribute::Bold);
        }
        table.add_row(vec![
            label,
            Cell::new(t.records),
            signed_cell(t.profit_yen),
            Cell::new(t.loss),
            Cell::new(t.games),
            Cell::new(t.big),
            Cell::new(t.reg),
        ]);
    }
    println!("{}", table);
}
