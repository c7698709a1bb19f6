#![allow(dead_code)]

/// Header mysqlbinlog prints before each rows event.
pub fn event_header(pos: u64, kind: &str) -> String {
    format!(
        "#231005 12:00:00 server id 1  end_log_pos {}  CRC32 0x1a2b3c4d \t{}: table id 90 flags: STMT_END_F",
        pos, kind
    )
}

/// One `mysqlbinlog --verbose` rows event, followed by the `# at` line of
/// the next event.
pub fn insert_event(database: &str, table: &str, pos: u64, values: &[(u32, &str)]) -> String {
    let mut lines = vec![
        format!("# at {}", pos),
        event_header(pos + 60, "Write_rows"),
        "BINLOG '".to_string(),
        "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA".to_string(),
        "'/*!*/;".to_string(),
        format!("### INSERT INTO `{}`.`{}`", database, table),
        "### SET".to_string(),
    ];
    lines.extend(values.iter().map(|(ordinal, value)| format!("###   @{}={}", ordinal, value)));
    lines.join("\n") + "\n"
}

pub fn update_event(
    database: &str,
    table: &str,
    pos: u64,
    before: &[(u32, &str)],
    after: &[(u32, &str)],
) -> String {
    let mut lines = vec![
        format!("# at {}", pos),
        event_header(pos + 60, "Update_rows"),
        format!("### UPDATE `{}`.`{}`", database, table),
        "### WHERE".to_string(),
    ];
    lines.extend(before.iter().map(|(ordinal, value)| format!("###   @{}={}", ordinal, value)));
    lines.push("### SET".to_string());
    lines.extend(after.iter().map(|(ordinal, value)| format!("###   @{}={}", ordinal, value)));
    lines.join("\n") + "\n"
}

pub fn delete_event(database: &str, table: &str, pos: u64, values: &[(u32, &str)]) -> String {
    let mut lines = vec![
        format!("# at {}", pos),
        event_header(pos + 60, "Delete_rows"),
        format!("### DELETE FROM `{}`.`{}`", database, table),
        "### WHERE".to_string(),
    ];
    lines.extend(values.iter().map(|(ordinal, value)| format!("###   @{}={}", ordinal, value)));
    lines.join("\n") + "\n"
}

/// Trailer that closes whatever block is still open.
pub fn commit(pos: u64) -> String {
    format!(
        "# at {}\n#231005 12:00:00 server id 1  end_log_pos {} \tXid = 42\nCOMMIT/*!*/;\n",
        pos,
        pos + 31
    )
}
