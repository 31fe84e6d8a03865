use colored::*;
use netdir_common::network::{NetworkObject, ObjectKind};
use netdir_core::NetworkObjectDirectory;
use tracing::info;

use crate::terminal::{colors, format};

pub const TOTAL_WIDTH: usize = 64;

pub fn print(msg: &str) {
    info!(target: "netdir::print", raw_msg = msg);
}

pub fn header(msg: &str, q_level: u8) {
    if q_level > 0 {
        return;
    }

    let formatted: String = format!("⟦ {} ⟧", msg);
    let msg_len: usize = formatted.chars().count();

    let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
    let left: usize = dash_count / 2;
    let right: usize = dash_count - left;

    let line: ColoredString = format!(
        "{}{}{}",
        "─".repeat(left),
        formatted.to_uppercase().bright_green(),
        "─".repeat(right)
    )
    .bright_black();

    print(&format!("{}", line));
}

pub fn fat_separator() {
    let sep: ColoredString = "═".repeat(TOTAL_WIDTH).bright_black();
    print(&format!("{}", sep));
}

/// Prints every object reachable from the root, indented by depth.
///
/// With `q_level` of 2 or more only groups are listed.
pub fn directory_tree(directory: &NetworkObjectDirectory, q_level: u8) {
    for line in tree_lines(directory.walk(), q_level) {
        print(&line);
    }
}

fn tree_lines(entries: Vec<(usize, NetworkObject)>, q_level: u8) -> Vec<String> {
    let entries: Vec<(usize, NetworkObject)> = entries
        .into_iter()
        .filter(|(_, object)| q_level < 2 || object.kind == ObjectKind::Group)
        .collect();

    entries
        .iter()
        .enumerate()
        .map(|(idx, (depth, object))| {
            let last_sibling: bool = entries[idx + 1..]
                .iter()
                .take_while(|(d, _)| d >= depth)
                .all(|(d, _)| d > depth);
            let branch: ColoredString =
                (if last_sibling { "└─" } else { "├─" }).color(colors::SEPARATOR);
            let indent: String = "   ".repeat(*depth);

            format!("{indent}{branch} {}", format::object_label(object))
        })
        .collect()
}

pub fn summary(directory: &NetworkObjectDirectory, q_level: u8) {
    let entries: Vec<(usize, NetworkObject)> = directory.walk();
    let groups: usize = entries
        .iter()
        .filter(|(_, object)| object.kind == ObjectKind::Group)
        .count();
    let hosts: usize = entries
        .iter()
        .filter(|(_, object)| object.kind == ObjectKind::Host)
        .count();

    let groups: ColoredString = format!("{groups} groups").bold().green();
    let hosts: ColoredString = format!("{hosts} hosts").bold().color(colors::ACCENT);
    let output: String = format!("Directory holds {groups} and {hosts}");

    if q_level == 0 {
        fat_separator();
    }
    print(&output.color(colors::TEXT_DEFAULT).to_string());
}

pub fn no_results() {
    print(&format!("{}", "Inventory is empty".red().bold()));
}
