//! Quiz catalogs used to populate an empty store.
//!
//! A catalog is plain data (built in, or read from a JSON file) and must be
//! validated into a [`ValidatedCatalog`] before a repository will write it.

use std::path::{Path, PathBuf};

use quiz_core::model::{Quiz, QuestionDraft};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogLoadError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid catalog entry in quiz {quiz:?}: {source}")]
    Invalid {
        quiz: String,
        #[source]
        source: quiz_core::Error,
    },
}

/// A question as written in a catalog file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSeed {
    pub text: String,
    pub options: Vec<String>,
    pub answer: String,
}

/// A quiz and its questions as written in a catalog file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSeed {
    pub name: String,
    #[serde(default)]
    pub questions: Vec<QuestionSeed>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CatalogSeed {
    pub quizzes: Vec<QuizSeed>,
}

/// A quiz whose name and questions passed domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedQuiz {
    pub name: String,
    pub questions: Vec<QuestionDraft>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidatedCatalog {
    pub quizzes: Vec<ValidatedQuiz>,
}

/// Rows written by one seeding run. Zero on a repeated run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedReport {
    pub quizzes_inserted: usize,
    pub questions_inserted: usize,
}

fn q(text: &str, options: &[&str], answer: &str) -> QuestionSeed {
    QuestionSeed {
        text: text.to_owned(),
        options: options.iter().map(|s| (*s).to_owned()).collect(),
        answer: answer.to_owned(),
    }
}

impl CatalogSeed {
    /// The catalog shipped with the application: Python, DBMS and DSA.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            quizzes: vec![
                QuizSeed {
                    name: "Python".to_owned(),
                    questions: vec![
                        q(
                            "Which of the following is the correct way to declare a variable in Python?",
                            &["int x = 10", "x = 10", "variable x = 10 ", "declare x = 10"],
                            "x = 10",
                        ),
                        q(
                            "Which data type is mutable?",
                            &["List", "Tuple", "String", "Integer"],
                            "List",
                        ),
                        q(
                            "What keyword is used to define a function in Python?",
                            &["def", "func", "function", "define"],
                            "def",
                        ),
                    ],
                },
                QuizSeed {
                    name: "DBMS".to_owned(),
                    questions: vec![
                        q(
                            "What is the purpose of a primary key in a relational database?",
                            &[
                                "To ensure that all records in a table are unique",
                                "To link two tables together",
                                "To allow NULL values in the table",
                                "To index the data in the table",
                            ],
                            "To ensure that all records in a table are unique",
                        ),
                        q(
                            "Which SQL statement is used to retrieve data?",
                            &["INSERT", "SELECT", "UPDATE", "DELETE"],
                            "SELECT",
                        ),
                        q(
                            "Which of the following is NOT a DDL command?",
                            &["CREATE", "DROP", "SELECT", "ALTER"],
                            "SELECT",
                        ),
                    ],
                },
                QuizSeed {
                    name: "DSA".to_owned(),
                    questions: vec![
                        q(
                            "What is the time complexity of searching for an element in a balanced binary search tree (BST)?",
                            &["O(n)", "O(logn)", "O(1)", "O(nlogn)"],
                            "O(logn)",
                        ),
                        q(
                            "Which data structure is used to implement recursion?",
                            &["Queue", "Stack", "Array", "Linked List"],
                            "Stack",
                        ),
                        // "Dijktra" is kept verbatim in both option and answer.
                        q(
                            "Which algorithm is used for finding the shortest path in a weighted graph with non-negative weights?",
                            &[
                                "Breadth-First Search (BFS)",
                                "Depth-First Search (DFS)",
                                "Kruskal's Algorithm",
                                "Dijktra's Algorithm",
                            ],
                            "Dijktra's Algorithm",
                        ),
                    ],
                },
            ],
        }
    }

    /// Parse a JSON catalog and validate it.
    ///
    /// # Errors
    ///
    /// Returns `CatalogLoadError::Parse` for malformed JSON and
    /// `CatalogLoadError::Invalid` for entries that break question rules.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogLoadError> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Read, parse and validate a JSON catalog file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogLoadError::Io` if the file cannot be read, otherwise
    /// the same errors as [`CatalogSeed::from_json_str`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogLoadError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Check every quiz name and question against the domain invariants.
    ///
    /// # Errors
    ///
    /// Returns `CatalogLoadError::Invalid` naming the first offending quiz.
    pub fn validate(&self) -> Result<ValidatedCatalog, CatalogLoadError> {
        let mut quizzes = Vec::with_capacity(self.quizzes.len());
        for quiz in &self.quizzes {
            let invalid = |source: quiz_core::Error| CatalogLoadError::Invalid {
                quiz: quiz.name.clone(),
                source,
            };
            Quiz::check_name(&quiz.name).map_err(|e| invalid(e.into()))?;
            let mut questions = Vec::with_capacity(quiz.questions.len());
            for question in &quiz.questions {
                let draft = QuestionDraft::new(
                    question.text.clone(),
                    question.options.clone(),
                    question.answer.clone(),
                )
                .map_err(|e| invalid(e.into()))?;
                questions.push(draft);
            }
            quizzes.push(ValidatedQuiz {
                name: quiz.name.clone(),
                questions,
            });
        }
        Ok(ValidatedCatalog { quizzes })
    }
}
