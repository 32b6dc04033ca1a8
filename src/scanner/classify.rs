use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

// Prefix match, not full-string: trailing fields after the third are
// tolerated and ignored.
static COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z]+,[A-Za-z]+,[A-Za-z]+").unwrap()
});

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClassifyError {
    #[error("comment {comment:?} does not match the STAGE,CLARITY,GENRE grammar")]
    Malformed { comment: String },
    #[error("unknown {field} {value:?} in comment {comment:?}")]
    UnknownClassifier {
        field: &'static str,
        value: String,
        comment: String,
    },
}

/// Envelope stage, the first comment field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Attack,
    Decay,
    Sustain,
    Release,
}

impl Stage {
    fn from_field(field: &str) -> Option<Self> {
        match field {
            "ATTACK" => Some(Self::Attack),
            "DECAY" => Some(Self::Decay),
            "SUSTAIN" => Some(Self::Sustain),
            "RELEASE" => Some(Self::Release),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Attack => "ATTACK",
            Self::Decay => "DECAY",
            Self::Sustain => "SUSTAIN",
            Self::Release => "RELEASE",
        }
    }
}

/// Tonal clarity, the second comment field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clarity {
    Dark,
    Neutral,
    Bright,
}

impl Clarity {
    fn from_field(field: &str) -> Option<Self> {
        match field {
            "DARK" => Some(Self::Dark),
            "NEUTRAL" => Some(Self::Neutral),
            "BRIGHT" => Some(Self::Bright),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "DARK",
            Self::Neutral => "NEUTRAL",
            Self::Bright => "BRIGHT",
        }
    }
}

/// Genre, the third comment field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Genre {
    Techno,
    Trance,
    House,
    Electro,
    Disco,
    Rock,
}

impl Genre {
    fn from_field(field: &str) -> Option<Self> {
        match field {
            "TECHNO" => Some(Self::Techno),
            "TRANCE" => Some(Self::Trance),
            "HOUSE" => Some(Self::House),
            "ELECTRO" => Some(Self::Electro),
            "DISCO" => Some(Self::Disco),
            "ROCK" => Some(Self::Rock),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Techno => "TECHNO",
            Self::Trance => "TRANCE",
            Self::House => "HOUSE",
            Self::Electro => "ELECTRO",
            Self::Disco => "DISCO",
            Self::Rock => "ROCK",
        }
    }
}

/// A validated (stage, clarity, genre) triple parsed from a comment tag.
/// The only way to get one is through [`parse`], so a triple in hand is
/// always fully valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifierTriple {
    pub stage: Stage,
    pub clarity: Clarity,
    pub genre: Genre,
}

impl ClassifierTriple {
    /// Destination directory segments, in stage/clarity/genre order.
    pub fn segments(self) -> [&'static str; 3] {
        [self.stage.as_str(), self.clarity.as_str(), self.genre.as_str()]
    }
}

/// Parse a comment into a validated triple. Matching is case-insensitive
/// and ignores surrounding whitespace.
pub fn parse(comment: &str) -> Result<ClassifierTriple, ClassifyError> {
    let comment = comment.trim().to_uppercase();

    if !COMMENT_RE.is_match(&comment) {
        return Err(ClassifyError::Malformed { comment });
    }

    let fields: Vec<&str> = comment.splitn(4, ',').collect();
    let (stage_raw, clarity_raw, genre_raw) = match fields.as_slice() {
        [stage, clarity, genre, ..] => (*stage, *clarity, *genre),
        _ => return Err(ClassifyError::Malformed { comment }),
    };

    let stage = Stage::from_field(stage_raw).ok_or_else(|| ClassifyError::UnknownClassifier {
        field: "stage",
        value: stage_raw.to_string(),
        comment: comment.clone(),
    })?;
    let clarity =
        Clarity::from_field(clarity_raw).ok_or_else(|| ClassifyError::UnknownClassifier {
            field: "clarity",
            value: clarity_raw.to_string(),
            comment: comment.clone(),
        })?;
    let genre = Genre::from_field(genre_raw).ok_or_else(|| ClassifyError::UnknownClassifier {
        field: "genre",
        value: genre_raw.to_string(),
        comment: comment.clone(),
    })?;

    Ok(ClassifierTriple { stage, clarity, genre })
}

/// Non-raising probe used when scanning candidate comments.
pub fn probe(comment: &str) -> bool {
    parse(comment).is_ok()
}

/// Pick the accepted comment from a sequence of candidates: the last one
/// that passes the probe wins. When none pass, the full parse runs on the
/// empty string so callers get a deterministic [`ClassifyError::Malformed`].
pub fn select<'a, I>(candidates: I) -> Result<ClassifierTriple, ClassifyError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut accepted = "";
    for candidate in candidates {
        if probe(candidate) {
            accepted = candidate;
        }
    }
    parse(accepted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_valid_triples() {
        let stages = ["ATTACK", "DECAY", "SUSTAIN", "RELEASE"];
        let clarities = ["DARK", "NEUTRAL", "BRIGHT"];
        let genres = ["TECHNO", "TRANCE", "HOUSE", "ELECTRO", "DISCO", "ROCK"];

        for stage in stages {
            for clarity in clarities {
                for genre in genres {
                    let comment = format!("{stage},{clarity},{genre}");
                    let triple = parse(&comment).unwrap();
                    assert_eq!(triple.segments(), [stage, clarity, genre]);
                }
            }
        }
    }

    #[test]
    fn is_case_insensitive_and_trims() {
        let triple = parse("  attack,dark,rock ").unwrap();
        assert_eq!(triple.segments(), ["ATTACK", "DARK", "ROCK"]);
    }

    #[test]
    fn tolerates_trailing_fields() {
        let triple = parse("DECAY,BRIGHT,HOUSE,whatever,else").unwrap();
        assert_eq!(triple.segments(), ["DECAY", "BRIGHT", "HOUSE"]);
    }

    #[test]
    fn rejects_malformed_comments() {
        for comment in ["", "ATTACK", "ATTACK,DARK", "ATTACK;DARK;ROCK", "1,2,3", "great track"] {
            match parse(comment) {
                Err(ClassifyError::Malformed { .. }) => {}
                other => panic!("expected Malformed for {comment:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn rejects_unknown_stage() {
        let err = parse("SLAM,DARK,ROCK").unwrap_err();
        assert_eq!(
            err,
            ClassifyError::UnknownClassifier {
                field: "stage",
                value: "SLAM".to_string(),
                comment: "SLAM,DARK,ROCK".to_string(),
            }
        );
    }

    #[test]
    fn rejects_unknown_clarity() {
        let err = parse("ATTACK,MURKY,ROCK").unwrap_err();
        assert_eq!(
            err,
            ClassifyError::UnknownClassifier {
                field: "clarity",
                value: "MURKY".to_string(),
                comment: "ATTACK,MURKY,ROCK".to_string(),
            }
        );
    }

    #[test]
    fn rejects_unknown_genre() {
        let err = parse("ATTACK,DARK,POLKA").unwrap_err();
        assert_eq!(
            err,
            ClassifyError::UnknownClassifier {
                field: "genre",
                value: "POLKA".to_string(),
                comment: "ATTACK,DARK,POLKA".to_string(),
            }
        );
    }

    #[test]
    fn trailing_letters_merge_into_the_genre_field() {
        // No comma after ROCK, so the junk lands in the third field.
        let err = parse("ATTACK,DARK,ROCKextra junk").unwrap_err();
        assert!(matches!(
            err,
            ClassifyError::UnknownClassifier { field: "genre", .. }
        ));
    }

    #[test]
    fn select_skips_non_matching_candidates() {
        let triple = select(["foo", "ATTACK,DARK,ROCK", "bar"]).unwrap();
        assert_eq!(triple.segments(), ["ATTACK", "DARK", "ROCK"]);
    }

    #[test]
    fn select_last_match_wins() {
        let triple = select(["ATTACK,DARK,ROCK", "DECAY,BRIGHT,HOUSE"]).unwrap();
        assert_eq!(triple.segments(), ["DECAY", "BRIGHT", "HOUSE"]);
    }

    #[test]
    fn select_with_no_candidates_is_malformed() {
        let err = select(Vec::<&str>::new()).unwrap_err();
        assert_eq!(err, ClassifyError::Malformed { comment: String::new() });
    }

    #[test]
    fn select_with_no_passing_candidate_is_malformed() {
        let err = select(["junk", "SLAM,DARK,ROCK"]).unwrap_err();
        assert_eq!(err, ClassifyError::Malformed { comment: String::new() });
    }
}
