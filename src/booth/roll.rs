// Primitives for reading the roll of voters registered at startup.

use std::fs::File;
use std::io::Read;

use serde::Deserialize;
use voting_registry::builder::Builder;

use crate::booth::config_reader::RollSource;
use crate::booth::*;

/// The voters registered when no roll is provided, with identifiers 1 to 79.
pub const DEFAULT_VOTERS: [&str; 79] = [
    "PRANAV UMESH",
    "PATEL NITI",
    "VAIBAV JAISWAL",
    "KARAN VAGHELA",
    "ASHISH JOHN",
    "PREETAM REDDY",
    "VADLA VAMSI KRISHNA",
    "SATHVIKA",
    "AJAY KUMAR",
    "GANESH REDDY",
    "SHIVRAJ",
    "SHREYASH PRADIPBHAI",
    "JASWANTH",
    "SUNIDHI SINGH",
    "SAHIL SAILESH",
    "CHANDRASEKHAR REDDY",
    "HARSHAL",
    "ABHNAY KUMAR",
    "MURALI",
    "SRIRAM",
    "VASANTH KUMAR REDDY",
    "HARSH",
    "MANIKANTA REDDY",
    "ADITYA PRAKASH",
    "HARSH CHAVDA",
    "DHRUV KUMAR",
    "BHARATH KALYAN",
    "VENKATA KISHORE",
    "MADHU BABU",
    "SANDHYA",
    "KARTHIKEYA REDDY",
    "MANJUNATH",
    "MADHU PRASAD",
    "VISHNU VARDHAN REDDY",
    "ABHINASH",
    "SAI VARDHAN REDDY",
    "DEVSHRI",
    "MEGHRAI",
    "SIDDHARDHA",
    "NEHA",
    "NARESH",
    "SAMUYELU",
    "PRATHMESH",
    "YATHEESH RAJA",
    "VINIT KUMAR",
    "RAFI VALI",
    "RAMAN RAVINDRA",
    "BHARGAV",
    "JEEVAN KUMAR",
    "UZMAA AFRIN",
    "SRUTHI",
    "SPOORTHIKA",
    "ADITHYA VINOD",
    "ROHITHA",
    "CHARAN KUMAR REDDY",
    "GRESHMANTH",
    "VAMSI KRISHNA",
    "CHARAN SAI",
    "VENU",
    "LAVANYA",
    "PRAVEEN REDDY",
    "YOGI",
    "VARSHINI",
    "SANKET",
    "SAI PRAPUL",
    "GOPI MAHITH",
    "SOMANATH",
    "KAMAL",
    "DHARMATEJA",
    "RUSHIKESH",
    "ANIL NAYAK",
    "SRI SHANTH",
    "VISHNU VARDHAN CHOWDARY",
    "BHARGAV",
    "VIGNESH",
    "HAVISH",
    "TRINADH SAI",
    "KRINAL",
    "NAVYANTH",
];

/// The voters of the default roll that stand as candidates.
pub const DEFAULT_CANDIDATES: [VoterId; 5] = [1, 3, 7, 11, 29];

/// Voters and candidates to register before serving.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct VoterRoll {
    pub voters: Vec<(VoterId, String)>,
    pub candidates: Vec<VoterId>,
}

impl VoterRoll {
    pub fn default_roll() -> VoterRoll {
        VoterRoll {
            voters: numbered(DEFAULT_VOTERS.iter().map(|s| s.to_string())),
            candidates: DEFAULT_CANDIDATES.to_vec(),
        }
    }

    /// Registers the roll in a fresh registry.
    pub fn seed(&self) -> BoothResult<VotingSystem> {
        let mut builder = Builder::new();
        for (voter_id, name) in self.voters.iter() {
            builder = builder.voter(*voter_id, name).context(SeedingSnafu {})?;
        }
        let system = builder
            .candidates(&self.candidates)
            .context(SeedingSnafu {})?
            .build();
        info!(
            "Seeded registry with {} voters and {} candidates",
            system.num_voters(),
            system.num_candidates()
        );
        Ok(system)
    }
}

fn numbered(names: impl Iterator<Item = String>) -> Vec<(VoterId, String)> {
    names
        .enumerate()
        .map(|(idx, name)| (idx as VoterId + 1, name))
        .collect()
}

#[derive(Debug, Deserialize)]
struct JsonRoll {
    voters: Vec<String>,
    #[serde(default)]
    candidates: Vec<VoterId>,
}

/// Reads `{"voters": [...], "candidates": [...]}`. Voters are numbered from 1.
pub fn read_json_roll<R: Read>(rdr: R, path: &str) -> BoothResult<VoterRoll> {
    let js: JsonRoll = serde_json::from_reader(rdr).context(ParsingJsonSnafu { path })?;
    debug!("read_json_roll: {:?}", js);
    Ok(VoterRoll {
        voters: numbered(js.voters.into_iter()),
        candidates: js.candidates,
    })
}

/// Reads a CSV file with a header row followed by `id,name` rows.
pub fn read_csv_roll<R: Read>(rdr: R) -> BoothResult<VoterRoll> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(rdr);
    let mut voters: Vec<(VoterId, String)> = Vec::new();
    for (idx, line_r) in reader.records().enumerate() {
        // The header is line 1.
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu {})?;
        debug!("read_csv_roll: lineno: {:?} row: {:?}", lineno, line);
        let id_s = line.get(0).context(CsvLineTooShortSnafu { lineno })?;
        let voter_id = id_s
            .parse::<VoterId>()
            .ok()
            .context(CsvInvalidIdSnafu { lineno, value: id_s })?;
        let name = line.get(1).context(CsvLineTooShortSnafu { lineno })?;
        voters.push((voter_id, name.to_string()));
    }
    Ok(VoterRoll {
        voters,
        candidates: Vec::new(),
    })
}

pub fn read_roll(source: &RollSource) -> BoothResult<VoterRoll> {
    info!("Attempting to read roll file {:?}", source.file_path);
    let path = source.file_path.as_str();
    let file = File::open(path).context(OpeningFileSnafu { path })?;
    match source.provider.as_str() {
        "json" => read_json_roll(file, path),
        "csv" => read_csv_roll(file),
        x => UnknownProviderSnafu { provider: x }.fail(),
    }
}

/// The roll to seed the registry with, as described by the settings.
pub fn load_roll(settings: &Settings) -> BoothResult<VoterRoll> {
    let mut roll = if settings.empty {
        VoterRoll::default()
    } else if let Some(source) = &settings.roll {
        read_roll(source)?
    } else {
        VoterRoll::default_roll()
    };
    if let Some(candidates) = &settings.candidates {
        roll.candidates = candidates.clone();
    }
    Ok(roll)
}
