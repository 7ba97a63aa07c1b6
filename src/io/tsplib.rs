//! TSPLIB coordinate-file parser.
//!
//! Reads the `KEY : value` header (`NAME`, `COMMENT`, `TYPE`, `DIMENSION`,
//! `EDGE_WEIGHT_TYPE`) followed by a `NODE_COORD_SECTION` of `id x y` lines,
//! up to `EOF` or the next section. Other header keys are ignored.
//!
//! Reference: Reinelt (1991) "TSPLIB—A Traveling Salesman Problem Library"

use std::path::Path;

use crate::error::{TspError, TspResult};
use crate::models::{Instance, Node};

/// Parses a TSPLIB file. An instance without a `NAME` takes the file stem.
///
/// # Errors
///
/// [`TspError::Io`] if the file cannot be read, otherwise as [`parse`].
pub fn parse_file(path: impl AsRef<Path>) -> TspResult<Instance> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
    parse_with_default_name(&content, stem)
}

/// Parses TSPLIB content.
///
/// # Errors
///
/// [`TspError::Parse`] when the dimension is missing or invalid before the
/// coordinates, a node id is outside `1..=N` or repeated, a number cannot be
/// read, the coordinate count differs from `N`, or `TYPE` is not `TSP`.
/// [`TspError::Allocation`] if the node table cannot be reserved.
///
/// # Examples
///
/// ```
/// use u_tsp::io::tsplib;
///
/// let text = "NAME : square\nTYPE : TSP\nDIMENSION : 4\nEDGE_WEIGHT_TYPE : EUC_2D\n\
///             NODE_COORD_SECTION\n1 0 0\n2 0 10\n3 10 10\n4 10 0\nEOF\n";
/// let inst = tsplib::parse(text).unwrap();
/// assert_eq!(inst.name(), "square");
/// assert_eq!(inst.dimension(), 4);
/// assert_eq!(inst.node(3).x(), 10.0);
/// ```
pub fn parse(content: &str) -> TspResult<Instance> {
    parse_with_default_name(content, "")
}

fn parse_with_default_name(content: &str, default_name: &str) -> TspResult<Instance> {
    let mut name = String::new();
    let mut comment = String::new();
    let mut problem_type = String::new();
    let mut edge_weight_type = String::new();
    let mut dimension: Option<usize> = None;
    let mut coords: Option<Vec<Option<(f64, f64)>>> = None;
    let mut count = 0usize;

    for (idx, raw) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("EOF") {
            break;
        }

        if let Some(slots) = coords.as_mut() {
            if line.contains("SECTION") {
                break;
            }
            let (id, x, y) = parse_coord_line(line, line_no)?;
            if id == 0 || id > slots.len() {
                return Err(TspError::parse_at(
                    line_no,
                    format!("node id {id} outside 1..={}", slots.len()),
                ));
            }
            if slots[id - 1].is_some() {
                return Err(TspError::parse_at(line_no, format!("duplicate node id {id}")));
            }
            slots[id - 1] = Some((x, y));
            count += 1;
            continue;
        }

        let (key, value) = match line.split_once(':') {
            Some((k, v)) => (k.trim(), v.trim()),
            None => (line, ""),
        };
        match key.to_uppercase().as_str() {
            "NAME" => name = value.to_string(),
            "COMMENT" => comment = value.to_string(),
            "TYPE" => problem_type = value.to_string(),
            "EDGE_WEIGHT_TYPE" => edge_weight_type = value.to_string(),
            "DIMENSION" => {
                let n: usize = value.parse().map_err(|_| {
                    TspError::parse_at(line_no, format!("invalid DIMENSION: {value}"))
                })?;
                dimension = Some(n);
            }
            "NODE_COORD_SECTION" => {
                let n = match dimension {
                    Some(n) if n > 0 => n,
                    _ => {
                        return Err(TspError::parse_at(
                            line_no,
                            "NODE_COORD_SECTION before a positive DIMENSION",
                        ))
                    }
                };
                let mut slots = Vec::new();
                slots
                    .try_reserve_exact(n)
                    .map_err(|_| TspError::Allocation { what: "node table" })?;
                slots.resize(n, None);
                coords = Some(slots);
            }
            _ => {}
        }
    }

    let slots = coords.ok_or_else(|| TspError::parse("missing NODE_COORD_SECTION"))?;
    if count != slots.len() {
        return Err(TspError::parse(format!(
            "expected {} coordinates, found {count}",
            slots.len()
        )));
    }
    if problem_type != "TSP" {
        return Err(TspError::parse(format!(
            "TYPE must be TSP, found {:?}",
            problem_type
        )));
    }

    let nodes: Vec<Node> = slots
        .into_iter()
        .enumerate()
        .filter_map(|(i, slot)| slot.map(|(x, y)| Node::new(i + 1, x, y)))
        .collect();

    if name.is_empty() {
        name = default_name.to_string();
    }
    let instance = Instance::new(name, edge_weight_type, nodes)?
        .with_comment(comment)
        .with_problem_type(problem_type);

    tracing::debug!(
        name = instance.name(),
        dimension = instance.dimension(),
        edge_weight_type = instance.edge_weight_type(),
        "instance loaded"
    );
    Ok(instance)
}

fn parse_coord_line(line: &str, line_no: usize) -> TspResult<(usize, f64, f64)> {
    let mut fields = line.split_whitespace();
    let (Some(id), Some(x), Some(y)) = (fields.next(), fields.next(), fields.next()) else {
        return Err(TspError::parse_at(line_no, "expected `id x y`"));
    };
    let id: usize = id
        .parse()
        .map_err(|_| TspError::parse_at(line_no, format!("invalid node id: {id}")))?;
    let x: f64 = x
        .parse()
        .map_err(|_| TspError::parse_at(line_no, format!("invalid x coordinate: {x}")))?;
    let y: f64 = y
        .parse()
        .map_err(|_| TspError::parse_at(line_no, format!("invalid y coordinate: {y}")))?;
    Ok((id, x, y))
}
