//! Drawing session: accumulates canvas taps into one facet outline.
//!
//! ```text
//! Idle --begin--> Drawing --complete (>= 3 points)--> Completed
//!                    |
//!                    +------cancel------------------> Cancelled
//! ```
//!
//! `reset` returns any state to `Idle`.

use crate::calibration::Calibration;
use crate::error::{Result, SessionError};
use crate::facet::{FacetId, Measurements, RoofFacet};
use crate::math::Point2;
use crate::operations::creation::FinalizeFacet;
use crate::operations::measure::{ComputeArea, ComputeMeasurements};

/// Where a drawing session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Drawing,
    /// Finished; holds the id of the facet that was produced.
    Completed(FacetId),
    Cancelled,
}

impl SessionState {
    fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Drawing => "drawing",
            Self::Completed(_) => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

/// One facet being drawn on a canvas.
#[derive(Debug, Clone)]
pub struct DrawingSession {
    state: SessionState,
    points: Vec<Point2>,
    calibration: Calibration,
}

impl Default for DrawingSession {
    fn default() -> Self {
        Self::new(Calibration::default())
    }
}

impl DrawingSession {
    /// Creates an idle session that measures with `calibration`.
    #[must_use]
    pub fn new(calibration: Calibration) -> Self {
        Self {
            state: SessionState::Idle,
            points: Vec::new(),
            calibration,
        }
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Points placed so far, in canvas pixels.
    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    /// Starts drawing.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` unless the session is idle.
    pub fn begin(&mut self) -> Result<()> {
        self.expect_state(SessionState::Idle, "begin drawing")?;
        self.state = SessionState::Drawing;
        Ok(())
    }

    /// Places the next outline vertex.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` unless the session is drawing.
    pub fn add_point(&mut self, point: Point2) -> Result<()> {
        self.expect_state(SessionState::Drawing, "add a point")?;
        self.points.push(point);
        Ok(())
    }

    /// Removes the most recently placed vertex, if any.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` unless the session is drawing.
    pub fn undo_point(&mut self) -> Result<Option<Point2>> {
        self.expect_state(SessionState::Drawing, "undo a point")?;
        Ok(self.points.pop())
    }

    /// Live area of the outline drawn so far, in square feet.
    #[must_use]
    pub fn preview_area(&self) -> f64 {
        ComputeArea::new(&self.points)
            .with_calibration(self.calibration)
            .execute()
    }

    /// Live measurements of the outline drawn so far.
    #[must_use]
    pub fn preview_measurements(&self) -> Measurements {
        ComputeMeasurements::new(&self.points)
            .with_calibration(self.calibration)
            .execute()
    }

    /// Finalizes the outline into a facet and moves to `Completed`.
    ///
    /// `existing_facet_count` numbers the default label. On error the session
    /// stays in `Drawing` with its points intact.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` unless drawing, or any error
    /// from [`FinalizeFacet::execute`] (notably fewer than 3 points).
    pub fn complete(
        &mut self,
        pitch_text: &str,
        label: &str,
        existing_facet_count: usize,
    ) -> Result<RoofFacet> {
        self.expect_state(SessionState::Drawing, "complete")?;
        let facet = FinalizeFacet::new(self.points.clone(), existing_facet_count)
            .with_pitch_text(pitch_text)
            .with_label(label)
            .with_calibration(self.calibration)
            .execute()?;
        self.points.clear();
        self.state = SessionState::Completed(facet.id());
        Ok(facet)
    }

    /// Discards the outline and moves to `Cancelled`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` unless the session is drawing.
    pub fn cancel(&mut self) -> Result<()> {
        self.expect_state(SessionState::Drawing, "cancel")?;
        tracing::debug!(discarded = self.points.len(), "drawing cancelled");
        self.points.clear();
        self.state = SessionState::Cancelled;
        Ok(())
    }

    /// Returns to `Idle` from any state, discarding unfinished points.
    pub fn reset(&mut self) {
        self.points.clear();
        self.state = SessionState::Idle;
    }

    fn expect_state(&self, expected: SessionState, action: &'static str) -> Result<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(SessionError::InvalidTransition {
                state: self.state.name(),
                action,
            }
            .into())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::diagram::RoofDiagram;
    use crate::error::{FacetError, RoofError};
    use approx::assert_relative_eq;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn draw(session: &mut DrawingSession, pts: &[Point2]) {
        session.begin().unwrap();
        for &pt in pts {
            session.add_point(pt).unwrap();
        }
    }

    #[test]
    fn complete_produces_facet() {
        init_tracing();
        let mut session = DrawingSession::default();
        draw(
            &mut session,
            &[p(0.0, 0.0), p(100.0, 0.0), p(100.0, 100.0), p(0.0, 100.0)],
        );
        assert_relative_eq!(session.preview_area(), 100.0, epsilon = 1e-9);

        let facet = session.complete("", "", 0).unwrap();
        assert_eq!(session.state(), SessionState::Completed(facet.id()));
        assert!(session.points().is_empty());
        assert_eq!(facet.label(), "Facet 1");
        assert_relative_eq!(facet.area(), 100.0, epsilon = 1e-9);
    }

    #[test]
    fn complete_with_two_points_stays_drawing() {
        init_tracing();
        let mut session = DrawingSession::default();
        draw(&mut session, &[p(0.0, 0.0), p(100.0, 0.0)]);

        let err = session.complete("6", "", 0).unwrap_err();
        assert!(matches!(
            err,
            RoofError::Facet(FacetError::InsufficientPoints { found: 2 })
        ));
        assert_eq!(session.state(), SessionState::Drawing);
        assert_eq!(session.points().len(), 2);
        assert!(session.preview_area().abs() < f64::EPSILON);

        session.add_point(p(0.0, 100.0)).unwrap();
        assert!(session.complete("6", "", 0).is_ok());
    }

    #[test]
    fn cancel_discards_points() {
        init_tracing();
        let mut session = DrawingSession::default();
        draw(&mut session, &[p(0.0, 0.0), p(10.0, 0.0)]);
        session.cancel().unwrap();
        assert_eq!(session.state(), SessionState::Cancelled);
        assert!(session.points().is_empty());
    }

    #[test]
    fn cancel_is_allowed_with_no_points() {
        let mut session = DrawingSession::default();
        session.begin().unwrap();
        assert!(session.cancel().is_ok());
    }

    #[test]
    fn undo_removes_last_point() {
        let mut session = DrawingSession::default();
        draw(&mut session, &[p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0)]);
        assert_eq!(session.undo_point().unwrap(), Some(p(10.0, 10.0)));
        assert_eq!(session.points().len(), 2);
        session.undo_point().unwrap();
        session.undo_point().unwrap();
        assert_eq!(session.undo_point().unwrap(), None);
    }

    #[test]
    fn invalid_transitions_are_reported() {
        let mut session = DrawingSession::default();
        let err = session.add_point(p(1.0, 1.0)).unwrap_err();
        assert!(matches!(
            err,
            RoofError::Session(SessionError::InvalidTransition {
                state: "idle",
                ..
            })
        ));
        assert!(session.cancel().is_err());
        assert!(session.complete("", "", 0).is_err());

        session.begin().unwrap();
        assert!(session.begin().is_err());
        session.cancel().unwrap();
        assert!(session.add_point(p(1.0, 1.0)).is_err());
    }

    #[test]
    fn reset_allows_a_new_drawing() {
        let mut session = DrawingSession::default();
        draw(&mut session, &[p(0.0, 0.0), p(10.0, 0.0), p(0.0, 10.0)]);
        session.complete("", "", 0).unwrap();
        assert!(session.begin().is_err());
        session.reset();
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.begin().is_ok());
    }

    #[test]
    fn sessions_feed_a_diagram() {
        init_tracing();
        let mut diagram = RoofDiagram::new();
        let mut session = DrawingSession::default();

        draw(
            &mut session,
            &[p(0.0, 0.0), p(100.0, 0.0), p(100.0, 100.0), p(0.0, 100.0)],
        );
        diagram.add_facet(session.complete("6", "", diagram.len()).unwrap());

        session.reset();
        draw(
            &mut session,
            &[p(0.0, 0.0), p(250.0, 0.0), p(250.0, 100.0), p(0.0, 100.0)],
        );
        diagram.add_facet(session.complete("8:12", "Garage", diagram.len()).unwrap());

        assert_relative_eq!(diagram.total_area(), 350.0, epsilon = 1e-9);
        assert_eq!(diagram.facets()[0].label(), "Facet 1");
        assert_eq!(diagram.facets()[1].label(), "Garage");
        assert_relative_eq!(diagram.facets()[1].pitch().rise(), 8.0);
    }
}
