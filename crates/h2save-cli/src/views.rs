use h2save_format::{LuaValue, SaveEntry, Savefile};
use owo_colors::OwoColorize;
use std::fmt;
use std::path::Path;

/// Header fields of one savefile.
pub struct HeaderView<'a> {
    name: &'a str,
    savefile: &'a Savefile,
    color: bool,
}

impl<'a> HeaderView<'a> {
    pub fn new(name: &'a str, savefile: &'a Savefile, color: bool) -> Self {
        Self {
            name,
            savefile,
            color,
        }
    }
}

impl fmt::Display for HeaderView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let save = self.savefile;
        let checksum: String = save.checksum.iter().map(|b| format!("{:02x}", b)).collect();
        let flag = |on: bool| if on { "yes" } else { "no" };

        if self.color {
            writeln!(f, "{}", self.name.bold())?;
        } else {
            writeln!(f, "{}", self.name)?;
        }

        let rows: [(&str, String); 11] = [
            ("checksum", checksum),
            ("timestamp", save.timestamp.to_string()),
            ("location", save.location.clone()),
            ("runs", save.runs.to_string()),
            ("meta points", save.accumulated_meta_points.to_string()),
            ("shrine points", save.active_shrine_points.to_string()),
            ("grasp", save.grasp.to_string()),
            ("easy mode", flag(save.easy_mode).to_string()),
            ("hard mode", flag(save.hard_mode).to_string()),
            ("current map", save.current_map_name.clone()),
            ("next map", save.start_next_map.clone()),
        ];
        for (label, value) in rows {
            write_row(f, label, &value, self.color)?;
        }
        write_row(f, "lua keys", &save.lua_keys.join(", "), self.color)
    }
}

/// Value counts of a decoded lua state.
pub struct LuaStatsView<'a> {
    state: &'a LuaValue,
    compressed: usize,
    color: bool,
}

impl<'a> LuaStatsView<'a> {
    pub fn new(state: &'a LuaValue, compressed: usize, color: bool) -> Self {
        Self {
            state,
            compressed,
            color,
        }
    }
}

impl fmt::Display for LuaStatsView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let top_level = self.state.as_table().map_or(0, |entries| entries.len());
        let tables = self.state.count(false, &mut |value| !value.is_primitive());
        let values = self.state.count(false, &mut |value| value.is_primitive());
        let keys = self.state.count(true, &mut |_| true) - self.state.count(false, &mut |_| true);

        write_row(f, "lua state", &format!("{} bytes", self.compressed), self.color)?;
        write_row(f, "top-level", &top_level.to_string(), self.color)?;
        write_row(f, "tables", &tables.to_string(), self.color)?;
        write_row(f, "values", &values.to_string(), self.color)?;
        write_row(f, "keys", &keys.to_string(), self.color)
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, label: &str, value: &str, color: bool) -> fmt::Result {
    let label = format!("{:<14}", format!("{}:", label));
    if color {
        writeln!(f, "  {} {}", label.bright_black(), value)
    } else {
        writeln!(f, "  {} {}", label, value)
    }
}

/// Savefiles found in a directory.
pub struct SaveListView<'a> {
    dir: &'a Path,
    saves: &'a [SaveEntry],
    color: bool,
}

impl<'a> SaveListView<'a> {
    pub fn new(dir: &'a Path, saves: &'a [SaveEntry], color: bool) -> Self {
        Self { dir, saves, color }
    }
}

impl fmt::Display for SaveListView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.saves.is_empty() {
            return writeln!(f, "No savefiles in {}", self.dir.display());
        }

        writeln!(f, "{}", self.dir.display())?;
        for save in self.saves {
            let size = format!("{:>10} bytes", save.size);
            if self.color {
                writeln!(f, "  {} {}", save.name.yellow(), size.bright_black())?;
            } else {
                writeln!(f, "  {} {}", save.name, size)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_save_list_without_color() {
        let saves = vec![
            SaveEntry {
                path: PathBuf::from("/saves/Profile1.sav"),
                name: "Profile1.sav".to_string(),
                size: 1024,
            },
            SaveEntry {
                path: PathBuf::from("/saves/Profile2.sav"),
                name: "Profile2.sav".to_string(),
                size: 12,
            },
        ];
        let view = SaveListView::new(Path::new("/saves"), &saves, false);
        assert_eq!(
            view.to_string(),
            "/saves\n  Profile1.sav       1024 bytes\n  Profile2.sav         12 bytes\n"
        );
    }

    #[test]
    fn test_empty_save_list() {
        let view = SaveListView::new(Path::new("/saves"), &[], false);
        assert_eq!(view.to_string(), "No savefiles in /saves\n");
    }

    #[test]
    fn test_lua_stats_counts() {
        let state = LuaValue::Table(vec![
            (
                LuaValue::String("A".into()),
                LuaValue::Table(vec![(LuaValue::Number(1.0), LuaValue::Bool(true))]),
            ),
            (LuaValue::String("B".into()), LuaValue::Nil),
        ]);
        let text = LuaStatsView::new(&state, 42, false).to_string();
        assert!(text.contains("lua state:     42 bytes"));
        assert!(text.contains("top-level:     2"));
        assert!(text.contains("tables:        2"));
        assert!(text.contains("values:        2"));
        assert!(text.contains("keys:          3"));
    }
}
