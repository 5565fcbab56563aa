use crate::app::validate::{is_valid_date, is_valid_email, is_valid_time};
use crate::app::AppContext;
use crate::models::{Property, RecordId, ScheduledVisit, VisitRequest};
use tracing::error;

/// Inputs of the scheduling modal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitForm {
    pub date: String,
    pub time: String,
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Scheduling modal for one listing
pub struct VisitScheduler {
    ctx: AppContext,
    property_id: RecordId,
    title: String,
    pub form: VisitForm,
    submitting: bool,
    scheduled: Option<ScheduledVisit>,
}

impl VisitScheduler {
    /// Open the modal, pre-filling contact details of the logged-in user
    pub fn open(ctx: AppContext, property: &Property) -> Self {
        let mut form = VisitForm::default();
        if let Some(user) = ctx.session.snapshot().user {
            form.name = user.display_name();
            form.email = user.email_address;
        }
        Self {
            ctx,
            property_id: property.id,
            title: property.title.clone(),
            form,
            submitting: false,
            scheduled: None,
        }
    }

    pub fn property_title(&self) -> &str {
        &self.title
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn scheduled(&self) -> Option<&ScheduledVisit> {
        self.scheduled.as_ref()
    }

    /// Validate the form and book the visit. Nothing is sent unless the
    /// date, time and email are present and well-formed.
    pub async fn submit(&mut self) -> bool {
        let form = &self.form;
        if [&form.date, &form.time, &form.email].iter().any(|s| s.trim().is_empty()) {
            self.ctx.notifier.warning("Please fill in all required fields");
            return false;
        }
        if !is_valid_email(form.email.trim()) {
            self.ctx.notifier.error("Please enter a valid email address");
            return false;
        }
        if !is_valid_date(&form.date) || !is_valid_time(&form.time) {
            self.ctx.notifier.error("Please pick a valid date and time");
            return false;
        }

        let phone = form.phone.trim();
        let request = VisitRequest {
            property_id: Some(self.property_id),
            date: form.date.trim().to_string(),
            time: form.time.trim().to_string(),
            email: form.email.trim().to_string(),
            phone: (!phone.is_empty()).then(|| phone.to_string()),
        };

        self.submitting = true;
        let result = self.ctx.visits.schedule_visit(&request).await;
        self.submitting = false;

        match result {
            Ok(visit) => {
                self.ctx.notifier.success(format!(
                    "Visit to {} scheduled for {} at {}",
                    self.title, visit.date, visit.time
                ));
                self.scheduled = Some(visit);
                true
            }
            Err(err) => {
                error!("Error scheduling visit: {}", err);
                self.ctx.notifier.error(format!("Failed to schedule visit: {err}"));
                false
            }
        }
    }
}
