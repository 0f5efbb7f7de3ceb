//! NCBI genetic code tables with IUPAC ambiguity resolution.

use std::collections::BTreeMap;

use crate::error::Error;

/// Base masks over the NCBI codon order T=0, C=1, A=2, G=3.
const T: u8 = 0b0001;
const C: u8 = 0b0010;
const A: u8 = 0b0100;
const G: u8 = 0b1000;

fn base_mask(b: u8) -> u8 {
    match b.to_ascii_uppercase() {
        b'T' | b'U' => T,
        b'C' => C,
        b'A' => A,
        b'G' => G,
        b'R' => A | G,
        b'Y' => C | T,
        b'K' => G | T,
        b'M' => A | C,
        b'S' => C | G,
        b'W' => A | T,
        b'B' => C | G | T,
        b'D' => A | G | T,
        b'H' => A | C | T,
        b'V' => A | C | G,
        b'N' => A | C | G | T,
        _ => 0,
    }
}

fn mask_indices(mask: u8) -> impl Iterator<Item = usize> {
    (0..4).filter(move |i| mask & (1 << i) != 0)
}

/// All concrete table indices compatible with a (possibly ambiguous) codon.
/// Empty when the codon is not three IUPAC nucleotides.
fn codon_indices(codon: &[u8]) -> Vec<usize> {
    if codon.len() != 3 {
        return Vec::new();
    }
    let (m0, m1, m2) = (base_mask(codon[0]), base_mask(codon[1]), base_mask(codon[2]));
    let mut indices = Vec::new();
    for i in mask_indices(m0) {
        for j in mask_indices(m1) {
            for k in mask_indices(m2) {
                indices.push(i * 16 + j * 4 + k);
            }
        }
    }
    indices
}

/// A single NCBI translation table.
///
/// Indexed by 6-bit codon encoding in NCBI order: T=0, C=1, A=2, G=3.
/// Index = first*16 + second*4 + third.
#[derive(Debug, Clone)]
pub struct GeneticCodeTable {
    number: u8,
    name: &'static str,
    amino_acids: [u8; 64],
    starts: [bool; 64],
}

impl GeneticCodeTable {
    /// Build from the NCBI `ncbieaa` / `sncbieaa` strings.
    fn from_ncbi(number: u8, name: &'static str, ncbieaa: &str, sncbieaa: &str) -> Self {
        let mut amino_acids = [b'X'; 64];
        for (slot, &aa) in amino_acids.iter_mut().zip(ncbieaa.as_bytes()) {
            *slot = aa;
        }
        let mut starts = [false; 64];
        for (slot, &s) in starts.iter_mut().zip(sncbieaa.as_bytes()) {
            *slot = s == b'M';
        }
        Self {
            number,
            name,
            amino_acids,
            starts,
        }
    }

    #[must_use]
    pub fn number(&self) -> u8 {
        self.number
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.name
    }

    /// Translate a single codon to a one-letter amino acid, `*` for stop.
    ///
    /// Ambiguous codons resolve to the amino acid shared by every compatible
    /// concrete codon, or `X` when they disagree.
    #[must_use]
    pub fn translate_codon(&self, codon: &[u8]) -> u8 {
        let indices = codon_indices(codon);
        let Some((&first, rest)) = indices.split_first() else {
            return b'X';
        };
        let aa = self.amino_acids[first];
        if rest.iter().all(|&i| self.amino_acids[i] == aa) {
            aa
        } else {
            b'X'
        }
    }

    /// True when every concrete codon compatible with `codon` is an initiation codon.
    #[must_use]
    pub fn is_start_codon(&self, codon: &[u8]) -> bool {
        let indices = codon_indices(codon);
        !indices.is_empty() && indices.iter().all(|&i| self.starts[i])
    }
}

/// Registry of NCBI translation tables, keyed by table number.
///
/// Built once and passed into the translator; read-only afterwards.
#[derive(Debug, Clone)]
pub struct GeneticCodes {
    tables: BTreeMap<u8, GeneticCodeTable>,
}

#[rustfmt::skip]
const NCBI_TABLES: [(u8, &str, &str, &str); 27] = [
    (1, "Standard",
        "FFLLSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        "---M------**--*----M---------------M----------------------------"),
    (2, "Vertebrate Mitochondrial",
        "FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIMMTTTTNNKKSS**VVVVAAAADDEEGGGG",
        "----------**--------------------MMMM----------**---M------------"),
    (3, "Yeast Mitochondrial",
        "FFLLSSSSYY**CCWWTTTTPPPPHHQQRRRRIIMMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        "----------**----------------------MM---------------M------------"),
    (4, "Mold, Protozoan, Coelenterate Mitochondrial and Mycoplasma/Spiroplasma",
        "FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        "--MM------**-------M------------MMMM---------------M------------"),
    (5, "Invertebrate Mitochondrial",
        "FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIMMTTTTNNKKSSSSVVVVAAAADDEEGGGG",
        "---M------**--------------------MMMM---------------M------------"),
    (6, "Ciliate, Dasycladacean and Hexamita Nuclear",
        "FFLLSSSSYYQQCC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        "--------------*--------------------M----------------------------"),
    (9, "Echinoderm and Flatworm Mitochondrial",
        "FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIIMTTTTNNNKSSSSVVVVAAAADDEEGGGG",
        "----------**-----------------------M---------------M------------"),
    (10, "Euplotid Nuclear",
        "FFLLSSSSYY**CCCWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        "----------**-----------------------M----------------------------"),
    (11, "Bacterial, Archaeal and Plant Plastid",
        "FFLLSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        "---M------**--*----M------------MMMM---------------M------------"),
    (12, "Alternative Yeast Nuclear",
        "FFLLSSSSYY**CC*WLLLSPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        "----------**--*----M---------------M----------------------------"),
    (13, "Ascidian Mitochondrial",
        "FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIMMTTTTNNKKSSGGVVVVAAAADDEEGGGG",
        "---M------**----------------------MM---------------M------------"),
    (14, "Alternative Flatworm Mitochondrial",
        "FFLLSSSSYYY*CCWWLLLLPPPPHHQQRRRRIIIMTTTTNNNKSSSSVVVVAAAADDEEGGGG",
        "-----------*-----------------------M----------------------------"),
    (15, "Blepharisma Macronuclear",
        "FFLLSSSSYY*QCC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        "----------*---*--------------------M----------------------------"),
    (16, "Chlorophycean Mitochondrial",
        "FFLLSSSSYY*LCC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        "----------*---*--------------------M----------------------------"),
    (21, "Trematode Mitochondrial",
        "FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIMMTTTTNNNKSSSSVVVVAAAADDEEGGGG",
        "----------**-----------------------M---------------M------------"),
    (22, "Scenedesmus obliquus Mitochondrial",
        "FFLLSS*SYY*LCC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        "------*---*---*--------------------M----------------------------"),
    (23, "Thraustochytrium Mitochondrial",
        "FF*LSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        "--*-------**--*-----------------M--M---------------M------------"),
    (24, "Rhabdopleuridae Mitochondrial",
        "FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSSKVVVVAAAADDEEGGGG",
        "---M------**-------M---------------M---------------M------------"),
    (25, "Candidate Division SR1 and Gracilibacteria",
        "FFLLSSSSYY**CCGWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        "---M------**-----------------------M---------------M------------"),
    (26, "Pachysolen tannophilus Nuclear",
        "FFLLSSSSYY**CC*WLLLAPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        "----------**--*----M---------------M----------------------------"),
    (27, "Karyorelict Nuclear",
        "FFLLSSSSYYQQCCWWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        "--------------*--------------------M----------------------------"),
    (28, "Condylostoma Nuclear",
        "FFLLSSSSYYQQCCWWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        "----------**--*--------------------M----------------------------"),
    (29, "Mesodinium Nuclear",
        "FFLLSSSSYYYYCC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        "--------------*--------------------M----------------------------"),
    (30, "Peritrich Nuclear",
        "FFLLSSSSYYEECC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        "--------------*--------------------M----------------------------"),
    (31, "Blastocrithidia Nuclear",
        "FFLLSSSSYYEECCWWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        "----------**-----------------------M----------------------------"),
    (32, "Balanophoraceae Plastid",
        "FFLLSSSSYY*WCC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        "---M------*---*----M------------MMMM---------------M------------"),
    (33, "Cephalodiscidae Mitochondrial",
        "FFLLSSSSYYY*CCWWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSSKVVVVAAAADDEEGGGG",
        "---M-------*-------M---------------M---------------M------------"),
];

impl GeneticCodes {
    /// The complete set of NCBI translation tables.
    #[must_use]
    pub fn ncbi() -> Self {
        let tables = NCBI_TABLES
            .iter()
            .map(|&(number, name, ncbieaa, sncbieaa)| {
                (
                    number,
                    GeneticCodeTable::from_ncbi(number, name, ncbieaa, sncbieaa),
                )
            })
            .collect();
        Self { tables }
    }

    /// Look up a table by NCBI number.
    pub fn get(&self, number: u8) -> Result<&GeneticCodeTable, Error> {
        self.tables
            .get(&number)
            .ok_or_else(|| Error::Configuration(format!("unknown translation table: {number}")))
    }

    pub fn numbers(&self) -> impl Iterator<Item = u8> + '_ {
        self.tables.keys().copied()
    }
}

impl Default for GeneticCodes {
    fn default() -> Self {
        Self::ncbi()
    }
}
