use crate::data::{
    Committee, CommitteeId, Error, TransferRecord, COMMITTEE_COLUMNS, COMMITTEE_ID_COLUMN,
    COMMITTEE_NAME_COLUMN, RECEIVER_COLUMN, SENDER_COLUMN, TRANSFER_COLUMNS,
};
use std::path::Path;
use tracing::info;

/// Loads a whole input file in memory; the parsers below never stream.
pub(crate) fn read_input(path: &Path) -> Result<Vec<u8>, Error> {
    let bytes = std::fs::read(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Read {} bytes from {}", bytes.len(), path.display());
    Ok(bytes)
}

/// Splits `input` into `|`-separated lines of exactly `expected` columns and
/// hands each one to `decode`. Empty lines are skipped and don't count toward
/// the line numbers reported in errors.
fn parse_lines<T, F>(input: &[u8], expected: usize, mut decode: F) -> Result<Vec<T>, Error>
where
    F: FnMut(&[&[u8]]) -> T,
{
    let mut records = Vec::new();
    let lines = input.split(|&b| b == b'\n').filter(|line| !line.is_empty());
    for (i, line) in lines.enumerate() {
        let cols: Vec<&[u8]> = line.split(|&b| b == b'|').collect();
        if cols.len() != expected {
            return Err(Error::Format {
                line: i + 1,
                expected,
                found: cols.len(),
            });
        }
        records.push(decode(&cols));
    }
    Ok(records)
}

fn text(col: &[u8]) -> String {
    String::from_utf8_lossy(col).into_owned()
}

/// Parses the "any transaction from one committee to another" bulk file into
/// (sender, receiver) pairs, in file order.
pub(crate) fn parse_transfers(input: &[u8]) -> Result<Vec<TransferRecord>, Error> {
    parse_lines(input, TRANSFER_COLUMNS, |cols| TransferRecord {
        sender: CommitteeId::new(text(cols[SENDER_COLUMN])),
        receiver: CommitteeId::new(text(cols[RECEIVER_COLUMN])),
    })
}

/// Parses the committee master bulk file into (id, name) entries, in file order.
pub(crate) fn parse_committees(input: &[u8]) -> Result<Vec<Committee>, Error> {
    parse_lines(input, COMMITTEE_COLUMNS, |cols| Committee {
        id: CommitteeId::new(text(cols[COMMITTEE_ID_COLUMN])),
        name: text(cols[COMMITTEE_NAME_COLUMN]),
    })
}

pub(crate) fn read_transfers(path: &Path) -> Result<Vec<TransferRecord>, Error> {
    let transfers = parse_transfers(&read_input(path)?)?;
    info!("Parsed {} transfers", transfers.len());
    Ok(transfers)
}

pub(crate) fn read_committees(path: &Path) -> Result<Vec<Committee>, Error> {
    let committees = parse_committees(&read_input(path)?)?;
    info!("Parsed {} committees", committees.len());
    Ok(committees)
}
