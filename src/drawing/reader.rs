use crate::{
    drawing::format::{
        self, DRAWING_START_TAG, INFO_END_TAG, INFO_START_TAG, SETTINGS_END_TAG,
        SETTINGS_START_TAG,
    },
    drawing::model::{DrawingMetadata, DrawingSettings, Waypoint},
    foundation::error::{DecodeWarning, PlotError, PlotResult},
    storage::{LineStream, Storage},
};

/// One waypoint pulled from the stream, with any problems found while decoding it.
#[derive(Clone, Debug, PartialEq)]
pub struct PointRead {
    /// Best-effort waypoint.
    pub waypoint: Waypoint,
    /// Non-fatal decode problems for this line.
    pub warnings: Vec<DecodeWarning>,
}

/// Streaming reader over an open drawing file.
///
/// Opening consumes the header and positions the stream right after `DRAWING_START`. Points are
/// then decoded one line per call; nothing past the current line is held in memory.
pub struct DrawingReader {
    stream: Box<dyn LineStream>,
    metadata: DrawingMetadata,
    settings: DrawingSettings,
    line_no: usize,
    yielded: usize,
    last: Waypoint,
}

impl std::fmt::Debug for DrawingReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrawingReader")
            .field("metadata", &self.metadata)
            .field("settings", &self.settings)
            .field("line_no", &self.line_no)
            .field("yielded", &self.yielded)
            .finish_non_exhaustive()
    }
}

#[derive(Default)]
struct SectionState {
    reading: bool,
    done: bool,
}

impl SectionState {
    fn observe(&mut self, line: &str, start_tag: &str, end_tag: &str, apply: impl FnOnce(&str)) {
        if line == start_tag {
            self.reading = true;
            self.done = false;
        }
        if self.reading {
            apply(line);
        }
        if self.reading && line == end_tag {
            self.reading = false;
            self.done = true;
        }
    }
}

impl DrawingReader {
    /// Open `path` on `storage` and consume its header.
    ///
    /// Fails with [`PlotError::NotFound`] when the path does not exist or cannot be opened,
    /// [`PlotError::MissingHeader`] when the info or settings section is never closed, and
    /// [`PlotError::MissingPointData`] when no `DRAWING_START` line follows.
    pub fn open(storage: &dyn Storage, path: &str) -> PlotResult<Self> {
        if !storage.exists(path) {
            return Err(PlotError::not_found(format!("no drawing at '{path}'")));
        }
        let stream = storage
            .open(path)
            .map_err(|e| PlotError::not_found(format!("open '{path}': {e}")))?;
        Self::from_stream(stream)
    }

    /// Consume the header of an already open stream.
    pub fn from_stream(mut stream: Box<dyn LineStream>) -> PlotResult<Self> {
        let mut metadata = DrawingMetadata::default();
        let mut settings = DrawingSettings::default();
        let mut info = SectionState::default();
        let mut tuning = SectionState::default();
        let mut line_no = 0usize;

        while !(info.done && tuning.done) {
            let Some(line) = next_line(stream.as_mut(), &mut line_no) else {
                break;
            };
            info.observe(&line, INFO_START_TAG, INFO_END_TAG, |l| {
                format::apply_info_line(l, &mut metadata)
            });
            tuning.observe(&line, SETTINGS_START_TAG, SETTINGS_END_TAG, |l| {
                format::apply_settings_line(l, &mut settings)
            });
        }

        let mut points_found = false;
        while let Some(line) = next_line(stream.as_mut(), &mut line_no) {
            if line == DRAWING_START_TAG {
                points_found = true;
                break;
            }
        }

        if !info.done {
            stream.close();
            return Err(PlotError::missing_header("drawing info section"));
        }
        if !tuning.done {
            stream.close();
            return Err(PlotError::missing_header("settings section"));
        }
        if !points_found {
            stream.close();
            return Err(PlotError::MissingPointData);
        }

        tracing::debug!(
            name = %metadata.name,
            points = metadata.point_count,
            data_line = line_no + 1,
            "drawing header parsed"
        );

        Ok(Self {
            stream,
            metadata,
            settings,
            line_no,
            yielded: 0,
            last: Waypoint::default(),
        })
    }

    /// Header metadata.
    pub fn metadata(&self) -> &DrawingMetadata {
        &self.metadata
    }

    /// Header motion settings.
    pub fn settings(&self) -> &DrawingSettings {
        &self.settings
    }

    /// Number of points decoded so far.
    pub fn yielded(&self) -> usize {
        self.yielded
    }

    /// Decode the next point line.
    ///
    /// Returns `None` once `point_count` points have been yielded or the stream is exhausted.
    pub fn next_point(&mut self) -> Option<PointRead> {
        if self.yielded >= self.metadata.point_count {
            return None;
        }
        let line = next_line(self.stream.as_mut(), &mut self.line_no)?;

        let mut warnings = Vec::new();
        let waypoint = format::decode_point(&line, self.line_no, &self.last, &mut warnings);
        self.last = waypoint;
        self.yielded += 1;
        Some(PointRead { waypoint, warnings })
    }

    /// Release the underlying stream.
    pub fn close(&mut self) {
        self.stream.close();
    }
}

impl Iterator for DrawingReader {
    type Item = PointRead;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_point()
    }
}

impl Drop for DrawingReader {
    fn drop(&mut self) {
        self.stream.close();
    }
}

fn next_line(stream: &mut dyn LineStream, line_no: &mut usize) -> Option<String> {
    match stream.read_line() {
        Ok(Some(line)) => {
            *line_no += 1;
            Some(line)
        }
        Ok(None) => None,
        Err(err) => {
            tracing::warn!(error = %err, line = *line_no + 1, "drawing read failed, treating as end of stream");
            None
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/drawing/reader.rs"]
mod tests;
