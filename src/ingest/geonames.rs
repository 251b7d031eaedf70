//! Readers for GeoNames dump files.
//!
//! - `cities*.txt` / `allCountries.txt`: one feature per line, 19 columns
//! - `admin1CodesASCII.txt`: `CC.code \t name \t ascii name \t geonameid`
//! - `countryInfo.txt`: `ISO \t ISO3 \t ISO-Numeric \t fips \t Country \t ...`
//!
//! All are tab-separated, unquoted and may be gzipped.

use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord};
use flate2::read::GzDecoder;
use hashbrown::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::info;

use revgeo::store::FeatureRecord;

mod col {
    pub const ID: usize = 0;
    pub const NAME: usize = 1;
    pub const ASCII_NAME: usize = 2;
    pub const LATITUDE: usize = 4;
    pub const LONGITUDE: usize = 5;
    pub const COUNTRY_CODE: usize = 8;
    pub const ADMIN1_CODE: usize = 10;
    pub const POPULATION: usize = 14;
}

/// Open a dump file, transparently un-gzipping `.gz` files.
pub fn open_dump(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let reader = BufReader::new(file);
    if path.extension().map_or(false, |e| e == "gz") {
        Ok(Box::new(GzDecoder::new(reader)))
    } else {
        Ok(Box::new(reader))
    }
}

/// GeoNames files are TSV without quoting; names may contain `"`.
pub fn tsv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b'\t')
        .quoting(false)
        .flexible(true)
        .comment(Some(b'#'))
        .from_reader(reader)
}

/// One parsed line of a cities dump.
#[derive(Debug, Clone, PartialEq)]
pub struct CityLine {
    pub id: i64,
    pub name: String,
    pub ascii_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub country_code: String,
    pub admin1_code: String,
    pub population: u64,
}

impl CityLine {
    pub fn parse(record: &StringRecord) -> Result<Self> {
        let field = |idx: usize, name: &str| {
            record
                .get(idx)
                .map(str::trim)
                .with_context(|| format!("missing {name} column"))
        };

        let latitude: f64 = field(col::LATITUDE, "latitude")?
            .parse()
            .context("latitude is not a number")?;
        let longitude: f64 = field(col::LONGITUDE, "longitude")?
            .parse()
            .context("longitude is not a number")?;

        Ok(Self {
            id: field(col::ID, "geonameid")?
                .parse()
                .context("geonameid is not an integer")?,
            name: field(col::NAME, "name")?.to_string(),
            ascii_name: field(col::ASCII_NAME, "asciiname")?.to_string(),
            latitude,
            longitude,
            country_code: field(col::COUNTRY_CODE, "country code")?.to_string(),
            admin1_code: field(col::ADMIN1_CODE, "admin1 code")?.to_string(),
            population: match field(col::POPULATION, "population")? {
                "" => 0,
                p => p.parse().context("population is not an integer")?,
            },
        })
    }

    /// Attach admin and country names. Unknown codes become empty names so
    /// every written row decodes cleanly.
    pub fn into_feature(self, lookups: &NameLookups) -> FeatureRecord {
        let admin_key = format!("{}.{}", self.country_code, self.admin1_code);
        let admin_name = lookups.admin1.get(&admin_key).cloned().unwrap_or_default();
        let country_name = lookups
            .countries
            .get(&self.country_code)
            .cloned()
            .unwrap_or_default();

        FeatureRecord::new(self.id, self.name, self.latitude, self.longitude)
            .with_ascii_name(self.ascii_name)
            .with_admin(admin_name)
            .with_country(self.country_code, country_name)
    }
}

/// Code-to-name tables used to denormalize city lines.
#[derive(Debug, Default)]
pub struct NameLookups {
    /// `"CH.25"` -> `"Zurich"`
    pub admin1: HashMap<String, String>,
    /// `"CH"` -> `"Switzerland"`
    pub countries: HashMap<String, String>,
}

impl NameLookups {
    pub fn load(admin1: Option<&Path>, countries: Option<&Path>) -> Result<Self> {
        let mut lookups = Self::default();
        if let Some(path) = admin1 {
            lookups.admin1 = load_pairs(path, 0, 1)?;
            info!("Loaded {} admin1 names", lookups.admin1.len());
        }
        if let Some(path) = countries {
            lookups.countries = load_pairs(path, 0, 4)?;
            info!("Loaded {} country names", lookups.countries.len());
        }
        Ok(lookups)
    }
}

fn load_pairs(path: &Path, key_idx: usize, value_idx: usize) -> Result<HashMap<String, String>> {
    let mut reader = tsv_reader(open_dump(path)?);
    read_pairs(&mut reader, key_idx, value_idx)
        .with_context(|| format!("Failed to read {}", path.display()))
}

fn read_pairs<R: Read>(
    reader: &mut csv::Reader<R>,
    key_idx: usize,
    value_idx: usize,
) -> Result<HashMap<String, String>> {
    let mut map = HashMap::new();
    for result in reader.records() {
        let record = result?;
        if let (Some(key), Some(value)) = (record.get(key_idx), record.get(value_idx)) {
            if !key.is_empty() {
                map.insert(key.to_string(), value.to_string());
            }
        }
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ZURICH: &str = "2657896\tZürich\tZurich\tZuerich,Zurigo\t47.36667\t8.55\tP\tPPLA\tCH\t\t25\t112\t261\t\t341730\t\t412\tEurope/Zurich\t2023-01-01";

    fn first_record(data: &str) -> StringRecord {
        tsv_reader(data.as_bytes()).records().next().unwrap().unwrap()
    }

    fn lookups() -> NameLookups {
        let mut l = NameLookups::default();
        l.admin1.insert("CH.25".into(), "Zurich".into());
        l.countries.insert("CH".into(), "Switzerland".into());
        l
    }

    #[test]
    fn test_parse_city_line() {
        let city = CityLine::parse(&first_record(ZURICH)).unwrap();
        assert_eq!(city.id, 2657896);
        assert_eq!(city.name, "Zürich");
        assert_eq!(city.ascii_name, "Zurich");
        assert_eq!(city.latitude, 47.36667);
        assert_eq!(city.longitude, 8.55);
        assert_eq!(city.country_code, "CH");
        assert_eq!(city.admin1_code, "25");
        assert_eq!(city.population, 341730);
    }

    #[test]
    fn test_quotes_in_names_are_literal() {
        let line = ZURICH.replace("Zürich", "\"Zürich\" Town");
        let city = CityLine::parse(&first_record(&line)).unwrap();
        assert_eq!(city.name, "\"Zürich\" Town");
    }

    #[test]
    fn test_short_line_is_rejected() {
        let err = CityLine::parse(&first_record("1\tShort\tShort")).unwrap_err();
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_bad_latitude_is_rejected() {
        let line = ZURICH.replace("47.36667", "north");
        assert!(CityLine::parse(&first_record(&line)).is_err());
    }

    #[test]
    fn test_into_feature_joins_names() {
        let feature = CityLine::parse(&first_record(ZURICH))
            .unwrap()
            .into_feature(&lookups());
        assert_eq!(feature.admin_name.as_deref(), Some("Zurich"));
        assert_eq!(feature.country_code.as_deref(), Some("CH"));
        assert_eq!(feature.country_name.as_deref(), Some("Switzerland"));
    }

    #[test]
    fn test_unknown_codes_become_empty_names() {
        let feature = CityLine::parse(&first_record(ZURICH))
            .unwrap()
            .into_feature(&NameLookups::default());
        assert_eq!(feature.admin_name.as_deref(), Some(""));
        assert_eq!(feature.country_name.as_deref(), Some(""));
    }

    #[test]
    fn test_country_info_skips_comments() {
        let data = "#ISO\tISO3\tISO-Numeric\tfips\tCountry\n\
                    CH\tCHE\t756\tSZ\tSwitzerland\tBern\n\
                    IS\tISL\t352\tIC\tIceland\tReykjavik\n";
        let mut reader = tsv_reader(data.as_bytes());
        let map = read_pairs(&mut reader, 0, 4).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("IS").map(String::as_str), Some("Iceland"));
    }

    #[test]
    fn test_load_gzipped_admin1() {
        use flate2::write::GzEncoder;
        use flate2::Compression;
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("admin1CodesASCII.txt.gz");
        let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        encoder
            .write_all("CH.25\tZurich\tZurich\t2657895\n".as_bytes())
            .unwrap();
        encoder.finish().unwrap();

        let lookups = NameLookups::load(Some(path.as_path()), None).unwrap();
        assert_eq!(lookups.admin1.get("CH.25").map(String::as_str), Some("Zurich"));
    }
}
