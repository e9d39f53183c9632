//! Intake wizard, a linear state machine with backward transitions.
//!
//! `City → Dates → Transport → Times → Companions → Interests → Confirm →
//! Generating → Itinerary`. Each forward transition is gated by a validator.
//! `back` returns to the immediate predecessor and keeps every answer already
//! given. `Generating` is entered only from [`Wizard::confirm`], which makes
//! exactly one generate call; `Itinerary` is terminal.

use chrono::{Duration, Local, NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use trip_types::{
    Result, TripError,
    event::PlannerEvent,
    intake::{LONG_DATE_FORMAT, TIME_FORMAT, TravelMode, TripIntake, parse_interests, trip_duration},
    itinerary::Itinerary,
    lookup::WeatherReport,
};

use crate::event_bus::EventBus;
use crate::ports::{LlmPort, PlacesPort, WeatherPort};
use crate::session::ItinerarySession;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    City,
    Dates,
    Transport,
    Times,
    Companions,
    Interests,
    Confirm,
    Generating,
    Itinerary,
}

impl WizardStep {
    pub fn label(&self) -> &'static str {
        match self {
            Self::City => "city",
            Self::Dates => "dates",
            Self::Transport => "transport",
            Self::Times => "times",
            Self::Companions => "companions",
            Self::Interests => "interests",
            Self::Confirm => "confirm",
            Self::Generating => "generating",
            Self::Itinerary => "itinerary",
        }
    }

    /// Step reached by `back`. `City` has none; `Generating` and
    /// `Itinerary` are not user-navigable.
    pub fn previous(&self) -> Option<Self> {
        match self {
            Self::City | Self::Generating | Self::Itinerary => None,
            Self::Dates => Some(Self::City),
            Self::Transport => Some(Self::Dates),
            Self::Times => Some(Self::Transport),
            Self::Companions => Some(Self::Times),
            Self::Interests => Some(Self::Companions),
            Self::Confirm => Some(Self::Interests),
        }
    }
}

/// Answers collected so far. Values survive backward navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeDraft {
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub arrival_time: NaiveTime,
    pub departure_time: NaiveTime,
    pub traveling_via: TravelMode,
    pub traveling_with: bool,
    pub interests: Vec<String>,
}

impl IntakeDraft {
    /// Empty destination, a one-night trip starting `today`, both times at `now`.
    pub fn starting(today: NaiveDate, now: NaiveTime) -> Self {
        let now = now.with_second(0).and_then(|t| t.with_nanosecond(0)).unwrap_or(now);
        Self {
            destination: String::new(),
            start_date: today,
            end_date: today + Duration::days(1),
            arrival_time: now,
            departure_time: now,
            traveling_via: TravelMode::default(),
            traveling_with: false,
            interests: Vec::new(),
        }
    }

    pub fn duration(&self) -> u32 {
        trip_duration(self.start_date, self.end_date).unwrap_or(0)
    }

    fn to_intake(&self) -> TripIntake {
        TripIntake {
            destination: self.destination.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            arrival_time: self.arrival_time,
            departure_time: self.departure_time,
            traveling_via: self.traveling_via.clone(),
            traveling_with: self.traveling_with,
            interests: self.interests.clone(),
        }
    }
}

pub struct Wizard {
    step: WizardStep,
    draft: IntakeDraft,
    weather: Option<WeatherReport>,
    event_bus: EventBus,
}

impl Wizard {
    pub fn new(event_bus: EventBus) -> Self {
        let now = Local::now();
        Self::with_draft(IntakeDraft::starting(now.date_naive(), now.time()), event_bus)
    }

    pub fn with_draft(draft: IntakeDraft, event_bus: EventBus) -> Self {
        Self {
            step: WizardStep::City,
            draft,
            weather: None,
            event_bus,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &IntakeDraft {
        &self.draft
    }

    /// Weather reported by the city lookup
    pub fn weather(&self) -> Option<&WeatherReport> {
        self.weather.as_ref()
    }

    pub fn is_complete(&self) -> bool {
        self.step == WizardStep::Itinerary
    }

    /// The city only sticks once the weather lookup for it succeeds.
    pub async fn submit_city(&mut self, city: &str, weather: &dyn WeatherPort) -> Result<WeatherReport> {
        self.expect_step(WizardStep::City)?;
        let city = city.trim();
        if city.is_empty() {
            return Err(TripError::Validation("Please enter a destination city.".to_string()));
        }

        let report = weather.current(city).await.map_err(|e| {
            log::warn!("Weather lookup for {} failed: {}", city, e);
            TripError::Validation(format!("Could not retrieve weather data for {}: {}", city, e))
        })?;

        self.draft.destination = city.to_string();
        self.weather = Some(report.clone());
        self.transition(WizardStep::Dates);
        Ok(report)
    }

    /// Returns the derived trip duration in days.
    pub fn submit_dates(&mut self, start: NaiveDate, end: NaiveDate) -> Result<u32> {
        self.expect_step(WizardStep::Dates)?;
        let duration = trip_duration(start, end).ok_or_else(|| {
            TripError::Validation("Start date must be before the end date.".to_string())
        })?;

        self.draft.start_date = start;
        self.draft.end_date = end;
        self.transition(WizardStep::Transport);
        Ok(duration)
    }

    pub fn submit_transport(&mut self, mode: TravelMode) -> Result<()> {
        self.expect_step(WizardStep::Transport)?;
        if mode.label().trim().is_empty() {
            return Err(TripError::Validation("Please tell me how you plan to travel.".to_string()));
        }

        self.draft.traveling_via = mode;
        self.transition(WizardStep::Times);
        Ok(())
    }

    pub fn submit_times(&mut self, arrival: NaiveTime, departure: NaiveTime) -> Result<()> {
        self.expect_step(WizardStep::Times)?;
        if self.draft.duration() == 1 && departure <= arrival {
            return Err(TripError::Validation(
                "On a single-day trip the departure must be after the arrival.".to_string(),
            ));
        }

        self.draft.arrival_time = arrival;
        self.draft.departure_time = departure;
        self.transition(WizardStep::Companions);
        Ok(())
    }

    pub fn submit_companions(&mut self, traveling_with: bool) -> Result<()> {
        self.expect_step(WizardStep::Companions)?;
        self.draft.traveling_with = traveling_with;
        self.transition(WizardStep::Interests);
        Ok(())
    }

    /// Comma-separated interests; at least one is required.
    pub fn submit_interests(&mut self, input: &str) -> Result<()> {
        self.expect_step(WizardStep::Interests)?;
        let interests = parse_interests(input);
        if interests.is_empty() {
            return Err(TripError::Validation("Please enter at least one interest.".to_string()));
        }

        self.draft.interests = interests;
        self.transition(WizardStep::Confirm);
        Ok(())
    }

    /// Human-readable trip summary shown at the confirm step.
    pub fn summary(&self) -> String {
        let d = &self.draft;
        format!(
            "Destination: {}\n\
             Dates: {} - {}\n\
             Duration: {} days\n\
             Traveling via: {}\n\
             Arrival Time: {}\n\
             Departure Time: {}\n\
             Traveling with pets/children: {}\n\
             Interests: {}",
            d.destination,
            d.start_date.format(LONG_DATE_FORMAT),
            d.end_date.format(LONG_DATE_FORMAT),
            d.duration(),
            d.traveling_via,
            d.arrival_time.format(TIME_FORMAT),
            d.departure_time.format(TIME_FORMAT),
            if d.traveling_with { "Yes" } else { "No" },
            d.interests.join(", "),
        )
    }

    /// The finalized intake record, validated.
    pub fn intake(&self) -> Result<TripIntake> {
        let intake = self.draft.to_intake();
        intake.validate()?;
        Ok(intake)
    }

    /// Confirm the trip and run the single generate call.
    ///
    /// Success moves to `Itinerary`; failure returns to `Confirm` with the
    /// error and leaves any itinerary the session already held untouched.
    pub async fn confirm(
        &mut self,
        session: &mut ItinerarySession,
        llm: &dyn LlmPort,
        weather: &dyn WeatherPort,
        places: &dyn PlacesPort,
    ) -> Result<Itinerary> {
        self.expect_step(WizardStep::Confirm)?;
        let intake = self.intake()?;

        self.transition(WizardStep::Generating);
        session.set_intake(intake);
        match session.generate(llm, weather, places).await {
            Ok(itinerary) => {
                self.transition(WizardStep::Itinerary);
                Ok(itinerary)
            }
            Err(e) => {
                log::warn!("Itinerary generation failed: {}", e);
                self.transition(WizardStep::Confirm);
                Err(e)
            }
        }
    }

    pub fn back(&mut self) -> Result<WizardStep> {
        let previous = self.step.previous().ok_or_else(|| {
            TripError::Validation(format!("cannot go back from the {} step", self.step.label()))
        })?;
        self.transition(previous);
        Ok(previous)
    }

    /// Start planning over with a fresh draft.
    pub fn reset(&mut self) {
        let now = Local::now();
        self.draft = IntakeDraft::starting(now.date_naive(), now.time());
        self.weather = None;
        self.transition(WizardStep::City);
    }

    fn expect_step(&self, expected: WizardStep) -> Result<()> {
        if self.step != expected {
            return Err(TripError::Validation(format!(
                "expected the {} step, but the wizard is at {}",
                expected.label(),
                self.step.label()
            )));
        }
        Ok(())
    }

    fn transition(&mut self, to: WizardStep) {
        let from = std::mem::replace(&mut self.step, to);
        log::debug!("Wizard step {} → {}", from.label(), to.label());
        self.event_bus.emit(PlannerEvent::StepChanged {
            from: from.label().to_string(),
            to: to.label().to_string(),
        });
    }
}
