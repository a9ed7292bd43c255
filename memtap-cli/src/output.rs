use comfy_table::{presets, CellAlignment, ContentArrangement, Table};

/// Format a byte slice as a continuous lowercase hex string.
pub fn format_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Borderless listing of a synthesized symbol table.
///
/// Names are left-aligned, addresses right-aligned, with a two-space gap
/// between the columns and no outer padding so the listing sits flush in the
/// terminal.
pub fn symbol_table<'a>(rows: impl IntoIterator<Item = (&'a str, &'a str)>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["NAME", "ADDRESS"]);

    if let Some(names) = table.column_mut(0) {
        names.set_cell_alignment(CellAlignment::Left);
        names.set_padding((0, 1));
    }
    if let Some(addresses) = table.column_mut(1) {
        addresses.set_cell_alignment(CellAlignment::Right);
        addresses.set_padding((1, 0));
    }

    for (name, address) in rows {
        table.add_row(vec![name, address]);
    }

    table
}
