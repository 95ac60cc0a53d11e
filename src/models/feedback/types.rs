use serde::{Deserialize, Serialize};

pub const CONTENT_QUESTIONS: [&str; 4] = [
    "The content was informative and relevant",
    "The training material was well organized and easy to follow",
    "The training objectives were communicated up front",
    "The training objectives were achieved",
];

pub const TRAINER_QUESTIONS: [&str; 6] = [
    "The trainer was knowledgeable",
    "Effective use of audio-visual aids",
    "Participation and group interaction were encouraged",
    "The trainer did a good job presenting",
    "Adequate time for questions",
    "The trainer was friendly and respectful",
];

pub const ORGANIZATION_QUESTIONS: [&str; 3] = [
    "Was the duration of the training appropriate?",
    "Was the session interactive and engaging?",
    "How would you rate the trainer's knowledge of the subject?",
];

pub const OVERALL_QUESTIONS: [&str; 3] = [
    "Training/knowledge/skills relevant to job role",
    "Others will benefit from the knowledge",
    "Training was worthwhile and should be repeated",
];

/// Likert scale labels; rating `n` maps to `RATING_LABELS[n - 1]`.
pub const RATING_LABELS: [&str; 5] = [
    "Strongly Disagree",
    "Disagree",
    "Neutral",
    "Agree",
    "Strongly Agree",
];

pub const MAX_RATING: u8 = 5;

/// Label shown next to a rating, `None` for 0 and anything past the scale.
pub fn rating_label(value: u8) -> Option<&'static str> {
    RATING_LABELS.get(usize::from(value).checked_sub(1)?).copied()
}

/// Rating value for a question the participant has not answered yet.
pub const UNANSWERED: u8 = 0;

/// One of the four Likert matrices on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Content,
    Trainer,
    Organization,
    Overall,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Content,
        Section::Trainer,
        Section::Organization,
        Section::Overall,
    ];

    pub fn questions(self) -> &'static [&'static str] {
        match self {
            Section::Content => &CONTENT_QUESTIONS,
            Section::Trainer => &TRAINER_QUESTIONS,
            Section::Organization => &ORGANIZATION_QUESTIONS,
            Section::Overall => &OVERALL_QUESTIONS,
        }
    }

    pub fn question_count(self) -> usize {
        self.questions().len()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Section::Content => "content",
            Section::Trainer => "trainer",
            Section::Organization => "organization",
            Section::Overall => "overall",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Section::Content => "Content & Impact",
            Section::Trainer => "Trainer",
            Section::Organization => "Organization",
            Section::Overall => "Overall Impression",
        }
    }

    pub fn parse(name: &str) -> Option<Section> {
        match name.trim().to_ascii_lowercase().as_str() {
            "content" => Some(Section::Content),
            "trainer" => Some(Section::Trainer),
            "organization" => Some(Section::Organization),
            "overall" => Some(Section::Overall),
            _ => None,
        }
    }
}

/// Fixed enumeration of subjects a session may have covered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topic {
    #[serde(rename = "Introduction")]
    Introduction,
    #[serde(rename = "Objectives")]
    Objectives,
    #[serde(rename = "Key Concepts")]
    KeyConcepts,
    #[serde(rename = "Case Studies")]
    CaseStudies,
    #[serde(rename = "Hands-on Activities")]
    HandsOnActivities,
    #[serde(rename = "Q&A Session")]
    QaSession,
    #[serde(rename = "Summary & Conclusion")]
    SummaryConclusion,
}

impl Topic {
    pub const ALL: [Topic; 7] = [
        Topic::Introduction,
        Topic::Objectives,
        Topic::KeyConcepts,
        Topic::CaseStudies,
        Topic::HandsOnActivities,
        Topic::QaSession,
        Topic::SummaryConclusion,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Topic::Introduction => "Introduction",
            Topic::Objectives => "Objectives",
            Topic::KeyConcepts => "Key Concepts",
            Topic::CaseStudies => "Case Studies",
            Topic::HandsOnActivities => "Hands-on Activities",
            Topic::QaSession => "Q&A Session",
            Topic::SummaryConclusion => "Summary & Conclusion",
        }
    }

    /// Exact label match after trimming surrounding whitespace.
    pub fn from_label(label: &str) -> Option<Topic> {
        let label = label.trim();
        Topic::ALL.into_iter().find(|t| t.label() == label)
    }
}

/// Identity fields at the top of the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Participant {
    pub full_name: String,
    pub email: String,
    pub job_role: String,
    pub training_title: String,
    pub instructor_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticipantField {
    FullName,
    Email,
    JobRole,
    TrainingTitle,
    InstructorName,
}

impl ParticipantField {
    pub const ALL: [ParticipantField; 5] = [
        ParticipantField::FullName,
        ParticipantField::Email,
        ParticipantField::JobRole,
        ParticipantField::TrainingTitle,
        ParticipantField::InstructorName,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ParticipantField::FullName => "Full name",
            ParticipantField::Email => "Email",
            ParticipantField::JobRole => "Job role",
            ParticipantField::TrainingTitle => "Training title",
            ParticipantField::InstructorName => "Instructor name",
        }
    }
}

impl Participant {
    pub fn get(&self, field: ParticipantField) -> &str {
        match field {
            ParticipantField::FullName => &self.full_name,
            ParticipantField::Email => &self.email,
            ParticipantField::JobRole => &self.job_role,
            ParticipantField::TrainingTitle => &self.training_title,
            ParticipantField::InstructorName => &self.instructor_name,
        }
    }

    pub fn set(&mut self, field: ParticipantField, value: String) {
        let slot = match field {
            ParticipantField::FullName => &mut self.full_name,
            ParticipantField::Email => &mut self.email,
            ParticipantField::JobRole => &mut self.job_role,
            ParticipantField::TrainingTitle => &mut self.training_title,
            ParticipantField::InstructorName => &mut self.instructor_name,
        };
        *slot = value;
    }
}

/// In-memory state of one feedback form.
///
/// Rating arrays are fixed-size so a section can never be resized; slot `i`
/// always answers question `i` of that section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackForm {
    pub participant: Participant,
    pub content_ratings: [u8; 4],
    pub trainer_ratings: [u8; 6],
    pub organization_ratings: [u8; 3],
    pub overall_ratings: [u8; 3],
    /// Selected topics in the order they were picked; never holds duplicates.
    pub covered_topics: Vec<Topic>,
    pub other_topic: String,
    pub comments: String,
}

impl FeedbackForm {
    pub fn ratings(&self, section: Section) -> &[u8] {
        match section {
            Section::Content => &self.content_ratings,
            Section::Trainer => &self.trainer_ratings,
            Section::Organization => &self.organization_ratings,
            Section::Overall => &self.overall_ratings,
        }
    }

    pub fn ratings_mut(&mut self, section: Section) -> &mut [u8] {
        match section {
            Section::Content => &mut self.content_ratings,
            Section::Trainer => &mut self.trainer_ratings,
            Section::Organization => &mut self.organization_ratings,
            Section::Overall => &mut self.overall_ratings,
        }
    }

    pub fn has_topic(&self, topic: Topic) -> bool {
        self.covered_topics.contains(&topic)
    }

    /// Serialize the current state into the wire payload.
    pub fn to_payload(&self) -> FeedbackPayload {
        let widen = |r: &[u8]| r.iter().map(|&v| i32::from(v)).collect::<Vec<_>>();
        FeedbackPayload {
            full_name: self.participant.full_name.clone(),
            email: self.participant.email.clone(),
            job_role: self.participant.job_role.clone(),
            training_title: self.participant.training_title.clone(),
            instructor_name: self.participant.instructor_name.clone(),
            content_ratings: widen(&self.content_ratings[..]),
            trainer_ratings: widen(&self.trainer_ratings[..]),
            organization_ratings: widen(&self.organization_ratings[..]),
            overall_ratings: widen(&self.overall_ratings[..]),
            covered_topics: self
                .covered_topics
                .iter()
                .map(|t| t.label().to_string())
                .collect(),
            other_topic: self.other_topic.clone(),
            comments: self.comments.clone(),
        }
    }
}

/// JSON body of `POST /submit-feedback`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackPayload {
    pub full_name: String,
    pub email: String,
    pub job_role: String,
    pub training_title: String,
    pub instructor_name: String,
    pub content_ratings: Vec<i32>,
    pub trainer_ratings: Vec<i32>,
    pub organization_ratings: Vec<i32>,
    pub overall_ratings: Vec<i32>,
    pub covered_topics: Vec<String>,
    #[serde(default)]
    pub other_topic: String,
    #[serde(default)]
    pub comments: String,
}

impl FeedbackPayload {
    pub fn ratings(&self, section: Section) -> &[i32] {
        match section {
            Section::Content => &self.content_ratings,
            Section::Trainer => &self.trainer_ratings,
            Section::Organization => &self.organization_ratings,
            Section::Overall => &self.overall_ratings,
        }
    }
}
