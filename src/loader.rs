use std::fs;
use std::path::Path;

use crate::common::Agent;
use crate::error::MapError;
use crate::map::GridMap;

#[derive(Debug, Clone)]
pub struct Instance {
    pub map: GridMap,
    pub agents: Vec<Agent>,
}

// <rows> <cols>
// <row of cols whitespace-separated '.'/'@' cells, repeated rows times>
// <num_agents>
// <sx> <sy> <gx> <gy>   (repeated num_agents times)
pub fn load_instance(path: impl AsRef<Path>) -> Result<Instance, MapError> {
    let text = fs::read_to_string(path)?;
    let mut lines = text.lines();

    let header = lines.next().ok_or(MapError::MissingHeader(None))?;
    let mut header_parts = header.split_whitespace();
    let rows = parse_usize(header_parts.next(), header)?;
    let cols = parse_usize(header_parts.next(), header)?;

    let mut grid = Vec::with_capacity(rows);
    for row_idx in 0..rows {
        let line = lines.next().ok_or(MapError::RowCountMismatch {
            expected: rows,
            got: row_idx,
        })?;
        let cells: Vec<&str> = line.split_whitespace().collect();
        if cells.len() != cols {
            return Err(MapError::RowWidthMismatch {
                row: row_idx,
                expected: cols,
                got: cells.len(),
            });
        }
        let row = cells
            .into_iter()
            .map(|cell| match cell {
                "." => Ok(false),
                "@" | "#" => Ok(true),
                other => Err(MapError::UnknownCell(other.chars().next().unwrap_or('?'))),
            })
            .collect::<Result<Vec<bool>, MapError>>()?;
        grid.push(row);
    }

    let map = GridMap::new(grid);

    let agent_count_line = lines
        .next()
        .ok_or(MapError::MissingAgentCount(None))?
        .trim();
    let num_agents: usize = agent_count_line
        .parse()
        .map_err(|_| MapError::MissingAgentCount(Some(agent_count_line.to_string())))?;

    let mut agents = Vec::with_capacity(num_agents);
    for id in 0..num_agents {
        let line = lines
            .next()
            .ok_or_else(|| MapError::MalformedAgentLine {
                line: id,
                content: String::new(),
            })?;
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() != 4 {
            return Err(MapError::MalformedAgentLine {
                line: id,
                content: line.to_string(),
            });
        }
        let malformed = || MapError::MalformedAgentLine {
            line: id,
            content: line.to_string(),
        };
        let sx: usize = parts[0].parse().map_err(|_| malformed())?;
        let sy: usize = parts[1].parse().map_err(|_| malformed())?;
        let gx: usize = parts[2].parse().map_err(|_| malformed())?;
        let gy: usize = parts[3].parse().map_err(|_| malformed())?;
        agents.push(Agent {
            id,
            start: (sx, sy),
            goal: (gx, gy),
        });
    }

    Ok(Instance { map, agents })
}

fn parse_usize(field: Option<&str>, header: &str) -> Result<usize, MapError> {
    let field = field.ok_or_else(|| MapError::MissingHeader(Some(header.to_string())))?;
    field
        .parse()
        .map_err(|source| MapError::InvalidHeader {
            value: field.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!(
            "cbs_mapf_loader_test_{:?}.txt",
            std::thread::current().id()
        ));
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn parses_a_well_formed_instance() {
        let path = write_temp("2 3\n. . .\n. @ .\n1\n0 0 1 2\n");
        let instance = load_instance(&path).unwrap();
        assert_eq!(instance.map.height(), 2);
        assert_eq!(instance.map.width(), 3);
        assert!(!instance.map.is_free((1, 1)));
        assert_eq!(instance.agents.len(), 1);
        assert_eq!(instance.agents[0].start, (0, 0));
        assert_eq!(instance.agents[0].goal, (1, 2));
        fs::remove_file(path).ok();
    }

    #[test]
    fn rejects_a_row_width_mismatch() {
        let path = write_temp("2 3\n. .\n. . .\n0\n");
        assert!(matches!(
            load_instance(&path),
            Err(MapError::RowWidthMismatch { row: 0, .. })
        ));
        fs::remove_file(path).ok();
    }

    #[test]
    fn rejects_an_unknown_cell_character() {
        let path = write_temp("1 3\n. x .\n0\n");
        assert!(matches!(
            load_instance(&path),
            Err(MapError::UnknownCell('x'))
        ));
        fs::remove_file(path).ok();
    }

    #[test]
    fn rejects_a_malformed_agent_line() {
        let path = write_temp("1 3\n. . .\n1\n0 0 2\n");
        assert!(matches!(
            load_instance(&path),
            Err(MapError::MalformedAgentLine { line: 0, .. })
        ));
        fs::remove_file(path).ok();
    }
}
