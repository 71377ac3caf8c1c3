//! Recherche de cadres ouverts de lecture (ORF) sur le brin direct

use serde::{Deserialize, Serialize};

pub const START_CODON: &[u8; 3] = b"ATG";
pub const STOP_CODONS: [&[u8; 3]; 3] = [b"TAA", b"TAG", b"TGA"];

/// 50 acides aminés
pub const DEFAULT_MIN_ORF_LENGTH: usize = 150;

/// ORF détectée. Positions en base 1, fin incluse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrfMatch {
    /// Cadre de lecture, 1 à 3
    pub frame: usize,
    pub start: usize,
    pub end: usize,
    pub length: usize,
    pub sequence: String,
}

fn is_stop(codon: &[u8]) -> bool {
    STOP_CODONS.iter().any(|stop| codon == &stop[..])
}

/// Parcourt les cadres 0, 1 et 2 par pas de 3.
///
/// Chaque `ATG` ouvre un candidat fermé par le premier codon stop en phase ;
/// le parcours reprend au codon suivant le départ, pas après le stop, donc
/// des ORF imbriquées partageant le même stop sont toutes rapportées. Un
/// départ sans stop en aval est ignoré.
pub fn find_orfs(sequence: &str, min_length: usize) -> Vec<OrfMatch> {
    let bytes = sequence.as_bytes();
    let len = bytes.len();
    let mut orfs = Vec::new();

    for frame in 0..3 {
        let mut i = frame;
        while i + 3 <= len {
            if &bytes[i..i + 3] == START_CODON {
                let mut j = i + 3;
                while j + 3 <= len {
                    if is_stop(&bytes[j..j + 3]) {
                        let length = j + 3 - i;
                        if length >= min_length {
                            orfs.push(OrfMatch {
                                frame: frame + 1,
                                start: i + 1,
                                end: j + 3,
                                length,
                                sequence: sequence[i..j + 3].to_string(),
                            });
                        }
                        break;
                    }
                    j += 3;
                }
            }
            i += 3;
        }
    }

    orfs
}

/// Plus longue ORF ; la première rencontrée en cas d'égalité
pub fn longest_orf(orfs: &[OrfMatch]) -> Option<&OrfMatch> {
    orfs.iter().fold(None, |best: Option<&OrfMatch>, orf| match best {
        Some(b) if b.length >= orf.length => Some(b),
        _ => Some(orf),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orf_with_inner_codons(inner: usize) -> String {
        format!("ATG{}TAA", "AAA".repeat(inner))
    }

    #[test]
    fn test_single_orf_literal_codon_count() {
        let seq = orf_with_inner_codons(49);
        let orfs = find_orfs(&seq, 150);

        assert_eq!(orfs.len(), 1);
        assert_eq!(orfs[0].frame, 1);
        assert_eq!(orfs[0].start, 1);
        assert_eq!(orfs[0].end, 153);
        assert_eq!(orfs[0].length, 153);
        assert_eq!(orfs[0].sequence, seq);
    }

    #[test]
    fn test_min_length_boundary() {
        // 3 + 144 + 3 = 150
        let exact = orf_with_inner_codons(48);
        assert_eq!(find_orfs(&exact, 150).len(), 1);
        assert!(find_orfs(&exact, 151).is_empty());

        // 147 < 150
        let short = orf_with_inner_codons(47);
        assert!(find_orfs(&short, 150).is_empty());
        assert_eq!(find_orfs(&short, 147).len(), 1);
    }

    #[test]
    fn test_start_without_stop_is_dropped() {
        let seq = format!("ATG{}", "AAA".repeat(80));
        assert!(find_orfs(&seq, 0).is_empty());
    }

    #[test]
    fn test_out_of_frame_stop_is_ignored() {
        // TAA décalé d'une base : pas de stop en phase
        let seq = format!("ATGA{}", "TAA".repeat(3));
        assert!(find_orfs(&seq, 0).is_empty());
    }

    #[test]
    fn test_frames_and_offsets() {
        let seq = format!("CC{}", orf_with_inner_codons(2));
        let orfs = find_orfs(&seq, 0);

        assert_eq!(orfs.len(), 1);
        assert_eq!(orfs[0].frame, 3);
        assert_eq!(orfs[0].start, 3);
        assert_eq!(orfs[0].end, seq.len());
        assert_eq!(orfs[0].length, 12);
    }

    #[test]
    fn test_scan_resumes_after_start_not_after_stop() {
        // La reprise à départ+3 rapporte aussi l'ORF interne qui partage le
        // stop. Comportement conservé volontairement ; s'il change, ce test
        // doit changer avec lui.
        let seq = "ATGATGAAATAA";
        let orfs = find_orfs(seq, 0);

        assert_eq!(orfs.len(), 2);
        assert_eq!((orfs[0].start, orfs[0].end, orfs[0].length), (1, 12, 12));
        assert_eq!((orfs[1].start, orfs[1].end, orfs[1].length), (4, 12, 9));
        assert!(orfs.iter().all(|o| o.frame == 1));
    }

    #[test]
    fn test_frame_order() {
        // cadre 2 puis cadre 1 dans le texte, rapportés cadre 1 d'abord
        let seq = "AATGTAACCATGTGA";
        let orfs = find_orfs(seq, 0);

        let frames: Vec<usize> = orfs.iter().map(|o| o.frame).collect();
        assert_eq!(frames, vec![1, 2]);
        assert_eq!((orfs[0].start, orfs[0].end), (10, 15));
        assert_eq!((orfs[1].start, orfs[1].end), (2, 7));
    }

    #[test]
    fn test_all_stop_codons() {
        for stop in ["TAA", "TAG", "TGA"] {
            let seq = format!("ATGCCC{stop}");
            let orfs = find_orfs(&seq, 0);
            assert_eq!(orfs.len(), 1, "stop {stop}");
            assert!(orfs[0].sequence.ends_with(stop));
        }
    }

    #[test]
    fn test_short_input() {
        assert!(find_orfs("", 0).is_empty());
        assert!(find_orfs("AT", 0).is_empty());
        assert!(find_orfs("ATG", 0).is_empty());
    }

    #[test]
    fn test_longest_orf() {
        let orfs = find_orfs("ATGATGAAATAA", 0);
        assert_eq!(longest_orf(&orfs).map(|o| o.start), Some(1));
        assert!(longest_orf(&[]).is_none());
    }
}
