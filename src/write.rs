use crate::compute::CommitteeStats;

/// Basic CSV exporter for the per-committee report. No header row.
pub(crate) fn write_report<W: std::io::Write>(
    writer: W,
    rows: &[CommitteeStats],
) -> Result<(), anyhow::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::{compute::CommitteeStats, write::write_report};

    #[test]
    fn write_rows() {
        let rows = [
            CommitteeStats {
                in_degree: 0,
                out_degree: 3,
                id: "C00000059".into(),
                name: "HALLMARK CARDS PAC".to_owned(),
            },
            CommitteeStats {
                in_degree: 2,
                out_degree: 1,
                id: "C00000422".into(),
                name: "AMERICAN MEDICAL ASSOCIATION, \"AMPAC\"".to_owned(),
            },
            CommitteeStats {
                in_degree: 5,
                out_degree: 1,
                id: "C9".into(),
                name: String::new(),
            },
        ];
        let mut out = Vec::new();
        write_report(&mut out, &rows).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\
0,3,C00000059,HALLMARK CARDS PAC
2,1,C00000422,\"AMERICAN MEDICAL ASSOCIATION, \"\"AMPAC\"\"\"
5,1,C9,
"
        );
    }

    #[test]
    fn write_nothing() {
        let mut out = Vec::new();
        write_report(&mut out, &[]).unwrap();
        assert!(out.is_empty());
    }
}
