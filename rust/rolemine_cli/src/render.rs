//! Plain-text tables for terminal output.

use std::fmt::Write;

use rolemine_core::fast_miner::FastMinerReport;
use rolemine_core::MiningResult;

/// PA table, a blank line, then the UA table.
pub fn mining_tables(result: &MiningResult) -> String {
    let pa: Vec<[String; 2]> = result
        .pa_labels()
        .into_iter()
        .map(|(role, permissions)| [role, permissions.join(",")])
        .collect();
    let ua: Vec<[String; 2]> = result
        .ua_labels()
        .into_iter()
        .map(|(user, roles)| [user, roles.join(",")])
        .collect();

    let mut out = table(&["Role", "Permissions"], &pa);
    out.push('\n');
    out.push_str(&table(&["User", "Roles"], &ua));
    if result.residual_uncovered > 0 {
        let _ = writeln!(
            out,
            "\n{} permission assignment(s) left uncovered",
            result.residual_uncovered
        );
    }
    out
}

/// FastMiner candidates, highest total count first.
pub fn candidate_table(report: &FastMinerReport) -> String {
    let rows: Vec<[String; 3]> = report
        .candidates
        .iter()
        .map(|c| {
            [
                c.label.clone(),
                c.original_count.to_string(),
                c.total_count.to_string(),
            ]
        })
        .collect();
    let mut out = table(&["Label", "Original Count", "Total Count"], &rows);
    let _ = writeln!(
        out,
        "\nCalculation time: {:.6} seconds",
        report.elapsed.as_secs_f64()
    );
    out
}

fn table<const N: usize>(header: &[&str; N], rows: &[[String; N]]) -> String {
    let mut widths = header.map(str::len);
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let mut out = String::new();
    let mut line = |cells: Vec<&str>| {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect();
        let _ = writeln!(out, "{}", padded.join("  ").trim_end());
    };

    line(header.to_vec());
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    line(rule.iter().map(String::as_str).collect());
    for row in rows {
        line(row.iter().map(String::as_str).collect());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rolemine_core::{basic_rmp, UpaMatrix};

    #[test]
    fn tables_are_aligned() {
        let out = table(
            &["Role", "Permissions"],
            &[
                ["R1".to_string(), "P2,P4".to_string()],
                ["R10".to_string(), "P1".to_string()],
            ],
        );
        assert_eq!(
            out,
            "Role  Permissions\n----  -----------\nR1    P2,P4\nR10   P1\n"
        );
    }

    #[test]
    fn mining_tables_list_pa_then_ua() {
        let upa = UpaMatrix::from_rows(&[vec![1, 1], vec![0, 1]]).unwrap();
        let out = mining_tables(&basic_rmp(&upa, 0).unwrap());
        let pa_at = out.find("Role").unwrap();
        let ua_at = out.find("User").unwrap();
        assert!(pa_at < ua_at);
        assert!(out.contains("R1    P1,P2\n"));
        assert!(out.contains("U1    R1\nU2    R2\n"));
        assert!(!out.contains("uncovered"));
    }
}
