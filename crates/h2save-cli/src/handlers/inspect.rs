use crate::views::{HeaderView, LuaStatsView};
use anyhow::Result;
use h2save_format::Savefile;
use h2save_runtime::display_name;
use h2save_types::NormalizedError;
use is_terminal::IsTerminal;
use std::path::Path;

pub fn handle(file: &Path, stats: bool) -> Result<()> {
    let name = display_name(file);
    let data = std::fs::read(file).map_err(|e| NormalizedError::ingestion(&name, e))?;

    let parsed = if stats {
        Savefile::parse(&data)
    } else {
        Savefile::parse_header_only(&data)
    };
    let savefile = parsed.map_err(NormalizedError::decode)?;

    let color = std::io::stdout().is_terminal();
    print!("{}", HeaderView::new(&name, &savefile, color));

    if stats {
        let state = savefile.parse_lua_state().map_err(NormalizedError::decode)?;
        print!("{}", LuaStatsView::new(&state, savefile.lua_state.len(), color));
    }

    Ok(())
}
