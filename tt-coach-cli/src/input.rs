use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use tt_coach::{Frame, Landmark, PlayerRecord};

/// Errors reading the JSON inputs of the analysis commands
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Frame {index} does not exist (recording has {len} frames)")]
    FrameOutOfRange { index: usize, len: usize },

    #[error("Frame {frame} has no body {body}")]
    BodyMissing { frame: usize, body: usize },
}

/// A recording is either a bare frame array or wrapped in `{"frames": [...]}`
#[derive(Deserialize)]
#[serde(untagged)]
enum Recording {
    Frames(Vec<Frame>),
    Wrapped { frames: Vec<Frame> },
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, InputError> {
    let contents = fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&contents).map_err(|source| InputError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a pose recording
pub fn load_frames(path: &Path) -> Result<Vec<Frame>, InputError> {
    let frames = match read_json::<Recording>(path)? {
        Recording::Frames(frames) => frames,
        Recording::Wrapped { frames } => frames,
    };
    tracing::debug!("Loaded {} frames from {}", frames.len(), path.display());
    Ok(frames)
}

/// Load a roster of player records
pub fn load_players(path: &Path) -> Result<Vec<PlayerRecord>, InputError> {
    let players: Vec<PlayerRecord> = read_json(path)?;
    tracing::debug!("Loaded {} players from {}", players.len(), path.display());
    Ok(players)
}

/// Landmarks of one body in one frame
pub fn body_landmarks(frames: &[Frame], frame: usize, body: usize) -> Result<&[Landmark], InputError> {
    let selected = frames.get(frame).ok_or(InputError::FrameOutOfRange {
        index: frame,
        len: frames.len(),
    })?;

    selected
        .bodies
        .get(body)
        .map(|b| b.landmarks.as_slice())
        .ok_or(InputError::BodyMissing { frame, body })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_bare_and_wrapped_frames() {
        let bare = write_temp(r#"[{"timestamp_seconds": 0.0, "poses": []}]"#);
        assert_eq!(load_frames(bare.path()).unwrap().len(), 1);

        let wrapped = write_temp(
            r#"{"frames": [{"timestampSeconds": 0.0, "bodies": []}, {"timestamp_seconds": 0.1}]}"#,
        );
        assert_eq!(load_frames(wrapped.path()).unwrap().len(), 2);
    }

    #[test]
    fn test_load_errors() {
        let missing = load_frames(Path::new("/definitely/not/here.json"));
        assert!(matches!(missing, Err(InputError::Read { .. })));

        let broken = write_temp("{not json");
        assert!(matches!(
            load_players(broken.path()),
            Err(InputError::Parse { .. })
        ));
    }

    #[test]
    fn test_body_landmarks() {
        let frames = vec![Frame::new(0.0, vec![])];
        assert!(matches!(
            body_landmarks(&frames, 3, 0),
            Err(InputError::FrameOutOfRange { index: 3, len: 1 })
        ));
        assert!(matches!(
            body_landmarks(&frames, 0, 0),
            Err(InputError::BodyMissing { frame: 0, body: 0 })
        ));
    }
}
