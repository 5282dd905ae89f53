use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::config::Config;
use crate::counts::{CountTable, GENE_ID_HEADER};
use crate::error::{CustomError, Result};
use crate::model::Samples;

pub fn write_count_table(table: &CountTable, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let f = File::create(path).map_err(|e| CustomError::Write {
        source: e,
        path: path.to_path_buf(),
    })?;
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_writer(BufWriter::new(f));

    let header = std::iter::once(GENE_ID_HEADER).chain(table.samples().iter().map(String::as_str));
    wtr.write_record(header)?;
    for (gene, counts) in table.rows() {
        let mut record = Vec::with_capacity(counts.len() + 1);
        record.push(gene.clone());
        record.extend(counts.iter().map(|c| c.to_string()));
        wtr.write_record(&record)?;
    }
    wtr.flush().map_err(|e| CustomError::Write {
        source: e,
        path: path.into(),
    })?;
    Ok(())
}

/// One `sample<TAB>mate<TAB>path` line per read file.
pub fn write_samples<W: Write>(samples: &Samples, writer: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_writer(writer);
    for (name, sample) in samples {
        for (mate, paths) in [("1", &sample.r1), ("2", &sample.r2)] {
            for path in paths {
                let path = path.to_string_lossy();
                wtr.write_record([name.as_str(), mate, &*path])?;
            }
        }
    }
    wtr.flush()
        .map_err(|e| CustomError::CsvWrite(csv::Error::from(e)))?;
    Ok(())
}

pub fn write_config<W: Write>(config: &Config, mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, config)
        .map_err(|e| CustomError::JsonWrite { source: e })?;
    writeln!(writer)
        .and_then(|_| writer.flush())
        .map_err(|e| CustomError::JsonWrite {
            source: serde_json::Error::io(e),
        })?;
    Ok(())
}

/// Buffered writer for `path`, or stdout when no path is given.
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let f = File::create(path).map_err(|e| CustomError::Write {
                source: e,
                path: path.to_path_buf(),
            })?;
            Ok(Box::new(BufWriter::new(f)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}
