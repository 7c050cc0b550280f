use std::env;
use std::fmt::Debug;
use std::str::FromStr;

/// Which polls a student may see beyond the audience rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentPollScope {
    /// Polls from the student's own teacher plus admin polls.
    OwnTeacher,
    /// Every poll whose audience includes students.
    AllStudents,
}

impl FromStr for StudentPollScope {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "own-teacher" => Ok(StudentPollScope::OwnTeacher),
            "all-students" => Ok(StudentPollScope::AllStudents),
            _ => Err(()),
        }
    }
}

/// How strictly task status changes are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskTransitions {
    /// Only open -> in-progress -> completed, one step at a time.
    Strict,
    /// Any target status is accepted.
    Lenient,
}

impl FromStr for TaskTransitions {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strict" => Ok(TaskTransitions::Strict),
            "lenient" => Ok(TaskTransitions::Lenient),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub student_poll_scope: StudentPollScope,
    pub task_transitions: TaskTransitions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            student_poll_scope: StudentPollScope::OwnTeacher,
            task_transitions: TaskTransitions::Strict,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            student_poll_scope: load_or(
                "CLASSTRACK_STUDENT_POLL_SCOPE",
                StudentPollScope::OwnTeacher,
            ),
            task_transitions: load_or("CLASSTRACK_TASK_TRANSITIONS", TaskTransitions::Strict),
        }
    }
}

fn load_or<T>(key: &str, default: T) -> T
where
    T: FromStr + Copy + Debug,
{
    match env::var(key) {
        Ok(value) => match value.parse() {
            Ok(parsed) => parsed,
            Err(_) => {
                tracing::warn!("Invalid {} value '{}', using {:?}", key, value, default);
                default
            }
        },
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_values_parse() {
        assert_eq!(
            "own-teacher".parse::<StudentPollScope>(),
            Ok(StudentPollScope::OwnTeacher)
        );
        assert_eq!(
            "all-students".parse::<StudentPollScope>(),
            Ok(StudentPollScope::AllStudents)
        );
        assert!("everything".parse::<StudentPollScope>().is_err());
    }

    #[test]
    fn transition_values_parse() {
        assert_eq!("strict".parse::<TaskTransitions>(), Ok(TaskTransitions::Strict));
        assert_eq!("lenient".parse::<TaskTransitions>(), Ok(TaskTransitions::Lenient));
        assert!("Strict".parse::<TaskTransitions>().is_err());
    }

    #[test]
    fn defaults_are_strict_and_teacher_scoped() {
        let config = Config::default();
        assert_eq!(config.student_poll_scope, StudentPollScope::OwnTeacher);
        assert_eq!(config.task_transitions, TaskTransitions::Strict);
    }
}
