use super::NodeId;
use serde::{Deserialize, Serialize};
use std::{io::Read, path::Path};

/// a road connection between approaches at two sites, as persisted in the
/// connections file with header `from,to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub from: NodeId,
    pub to: NodeId,
}

impl Connection {
    pub fn new(from: NodeId, to: NodeId) -> Connection {
        Connection { from, to }
    }

    pub fn from_csv_file(path: &Path) -> Result<Vec<Connection>, csv::Error> {
        let file = std::fs::File::open(path)?;
        Connection::from_csv_reader(file)
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Vec<Connection>, csv::Error> {
        csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader)
            .deserialize::<Connection>()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::Connection;
    use crate::model::graph::NodeId;

    #[test]
    fn reads_connections() {
        let text = "from,to\n970-1,2000-3\n 2000-4 , 3001-1 \n";
        let connections = Connection::from_csv_reader(text.as_bytes()).expect("reads");
        assert_eq!(
            connections,
            vec![
                Connection::new(NodeId::new(970, 1), NodeId::new(2000, 3)),
                Connection::new(NodeId::new(2000, 4), NodeId::new(3001, 1)),
            ]
        );
    }

    #[test]
    fn rejects_bad_node_ids() {
        let text = "from,to\n970:1,2000-3\n";
        assert!(Connection::from_csv_reader(text.as_bytes()).is_err());
    }
}
