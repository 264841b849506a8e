//! IAU constellation abbreviations and their full names

use lazy_static::lazy_static;
use std::collections::HashMap;

lazy_static! {
    /// Map from three-letter abbreviation to full name
    static ref FULL_NAMES: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        for &(abbrev, name) in IAU_NAME_PAIRS.iter() {
            m.insert(abbrev, name);
        }
        m
    };
}

/// Full name for an IAU abbreviation such as `"UMa"`; lookup is case-sensitive
pub fn full_name(abbrev: &str) -> Option<&'static str> {
    FULL_NAMES.get(abbrev).copied()
}

/// Display name for a feed id, falling back to the id itself
pub fn display_name(id: &str) -> String {
    full_name(id).map_or_else(|| id.to_string(), str::to_string)
}

/// Pairs of (abbreviation, name) for the 88 modern constellations
const IAU_NAME_PAIRS: [(&str, &str); 88] = [
    ("And", "Andromeda"),
    ("Ant", "Antlia"),
    ("Aps", "Apus"),
    ("Aqr", "Aquarius"),
    ("Aql", "Aquila"),
    ("Ara", "Ara"),
    ("Ari", "Aries"),
    ("Aur", "Auriga"),
    ("Boo", "Boötes"),
    ("Cae", "Caelum"),
    ("Cam", "Camelopardalis"),
    ("Cnc", "Cancer"),
    ("CVn", "Canes Venatici"),
    ("CMa", "Canis Major"),
    ("CMi", "Canis Minor"),
    ("Cap", "Capricornus"),
    ("Car", "Carina"),
    ("Cas", "Cassiopeia"),
    ("Cen", "Centaurus"),
    ("Cep", "Cepheus"),
    ("Cet", "Cetus"),
    ("Cha", "Chamaeleon"),
    ("Cir", "Circinus"),
    ("Col", "Columba"),
    ("Com", "Coma Berenices"),
    ("CrA", "Corona Australis"),
    ("CrB", "Corona Borealis"),
    ("Crv", "Corvus"),
    ("Crt", "Crater"),
    ("Cru", "Crux"),
    ("Cyg", "Cygnus"),
    ("Del", "Delphinus"),
    ("Dor", "Dorado"),
    ("Dra", "Draco"),
    ("Equ", "Equuleus"),
    ("Eri", "Eridanus"),
    ("For", "Fornax"),
    ("Gem", "Gemini"),
    ("Gru", "Grus"),
    ("Her", "Hercules"),
    ("Hor", "Horologium"),
    ("Hya", "Hydra"),
    ("Hyi", "Hydrus"),
    ("Ind", "Indus"),
    ("Lac", "Lacerta"),
    ("Leo", "Leo"),
    ("LMi", "Leo Minor"),
    ("Lep", "Lepus"),
    ("Lib", "Libra"),
    ("Lup", "Lupus"),
    ("Lyn", "Lynx"),
    ("Lyr", "Lyra"),
    ("Men", "Mensa"),
    ("Mic", "Microscopium"),
    ("Mon", "Monoceros"),
    ("Mus", "Musca"),
    ("Nor", "Norma"),
    ("Oct", "Octans"),
    ("Oph", "Ophiuchus"),
    ("Ori", "Orion"),
    ("Pav", "Pavo"),
    ("Peg", "Pegasus"),
    ("Per", "Perseus"),
    ("Phe", "Phoenix"),
    ("Pic", "Pictor"),
    ("Psc", "Pisces"),
    ("PsA", "Piscis Austrinus"),
    ("Pup", "Puppis"),
    ("Pyx", "Pyxis"),
    ("Ret", "Reticulum"),
    ("Sge", "Sagitta"),
    ("Sgr", "Sagittarius"),
    ("Sco", "Scorpius"),
    ("Scl", "Sculptor"),
    ("Sct", "Scutum"),
    ("Ser", "Serpens"),
    ("Sex", "Sextans"),
    ("Tau", "Taurus"),
    ("Tel", "Telescopium"),
    ("Tri", "Triangulum"),
    ("TrA", "Triangulum Australe"),
    ("Tuc", "Tucana"),
    ("UMa", "Ursa Major"),
    ("UMi", "Ursa Minor"),
    ("Vel", "Vela"),
    ("Vir", "Virgo"),
    ("Vol", "Volans"),
    ("Vul", "Vulpecula"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_all_88_distinct() {
        let abbrevs: HashSet<_> = IAU_NAME_PAIRS.iter().map(|(a, _)| a).collect();
        assert_eq!(abbrevs.len(), 88);
    }

    #[test]
    fn test_lookup() {
        assert_eq!(full_name("UMa"), Some("Ursa Major"));
        assert_eq!(full_name("Boo"), Some("Boötes"));
        assert_eq!(full_name("PsA"), Some("Piscis Austrinus"));
        assert_eq!(full_name("uma"), None);
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        assert_eq!(display_name("Ori"), "Orion");
        assert_eq!(display_name("Xyz"), "Xyz");
        assert_eq!(display_name(""), "");
    }
}
