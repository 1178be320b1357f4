//! @ai:module:intent Decide who may see a student's report and which tests it covers
//! @ai:module:layer application
//! @ai:module:public_api Audience, authorize, applicable_results
//! @ai:module:stateless true

use crate::error::{Error, Result};
use crate::shaping::TestCategory;
use crate::store::{Requester, Role, Student, TestResult};
use serde::{Deserialize, Serialize};

/// @ai:intent Who the report is rendered for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    Tutor,
    Psychologist,
}

impl Audience {
    /// @ai:intent Categories this audience may see
    /// @ai:effects pure
    pub fn applicable_categories(&self) -> &'static [TestCategory] {
        match self {
            Audience::Tutor => &[
                TestCategory::LearningStyles,
                TestCategory::EmotionalIntelligence,
                TestCategory::SoftSkills,
            ],
            Audience::Psychologist => &[
                TestCategory::LearningStyles,
                TestCategory::EmotionalIntelligence,
                TestCategory::SoftSkills,
                TestCategory::PsychologicalAssistance,
            ],
        }
    }

    /// @ai:effects pure
    pub fn allows(&self, category: TestCategory) -> bool {
        self.applicable_categories().contains(&category)
    }
}

impl From<Role> for Audience {
    fn from(role: Role) -> Self {
        match role {
            Role::Tutor => Audience::Tutor,
            Role::Psychologist => Audience::Psychologist,
        }
    }
}

/// @ai:intent Check standing access to the student's group and semester
/// @ai:post Ok carries the audience implied by the requester's role
/// @ai:effects pure
pub fn authorize(requester: &Requester, student: &Student) -> Result<Audience> {
    let Some(group) = &student.group else {
        return Err(Error::AccessDenied(format!(
            "student {} has no group assigned",
            student.control_number
        )));
    };

    let assigned = requester
        .assignments
        .iter()
        .any(|a| a.active && a.group_id == group.id && a.semester == student.semester);

    if !assigned {
        return Err(Error::AccessDenied(format!(
            "no active assignment for group {} semester {}",
            group.name, student.semester
        )));
    }

    Ok(requester.role.into())
}

/// @ai:intent Results the audience may see, in stored order
/// @ai:effects pure
pub fn applicable_results(audience: Audience, results: &[TestResult]) -> Vec<TestResult> {
    results
        .iter()
        .filter(|r| audience.allows(TestCategory::from_code(&r.test.code)))
        .cloned()
        .collect()
}
