use quiz_core::model::{Credentials, QuizId, Score, UserId};
use quiz_core::time::fixed_now;
use storage::repository::{
    NewScoreRecord, QuizRepository, ScoreRepository, StorageError, UserRepository,
};
use storage::seed::{CatalogSeed, QuestionSeed, QuizSeed, SeedReport};
use storage::sqlite::SqliteRepository;

async fn fresh(name: &str) -> SqliteRepository {
    let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
    let repo = SqliteRepository::connect(&url).await.expect("connect");
    repo.initialize().await.expect("initialize");
    repo
}

#[tokio::test]
async fn seeding_is_idempotent_across_runs() {
    let repo = fresh("memdb_seed_twice").await;
    let catalog = CatalogSeed::builtin().validate().unwrap();

    let first = repo.seed_catalog(&catalog).await.unwrap();
    assert_eq!(
        first,
        SeedReport {
            quizzes_inserted: 3,
            questions_inserted: 9
        }
    );
    let second = repo.seed_catalog(&catalog).await.unwrap();
    assert_eq!(second, SeedReport::default());

    let quizzes = repo.list_quizzes().await.unwrap();
    let names: Vec<_> = quizzes.iter().map(|q| q.name()).collect();
    assert_eq!(names, ["Python", "DBMS", "DSA"]);
    for quiz in &quizzes {
        assert_eq!(repo.questions_for_quiz(quiz.id()).await.unwrap().len(), 3);
    }
}

#[tokio::test]
async fn seeding_adds_only_missing_questions() {
    let repo = fresh("memdb_seed_extend").await;
    repo.seed_catalog(&CatalogSeed::builtin().validate().unwrap())
        .await
        .unwrap();

    let mut extended = CatalogSeed::builtin();
    extended.quizzes[0].questions.push(QuestionSeed {
        text: "Which keyword starts a loop over an iterable?".into(),
        options: vec!["for".into(), "loop".into(), "each".into()],
        answer: "for".into(),
    });
    extended.quizzes.push(QuizSeed {
        name: "Rust".into(),
        questions: Vec::new(),
    });

    let report = repo
        .seed_catalog(&extended.validate().unwrap())
        .await
        .unwrap();
    assert_eq!(report.quizzes_inserted, 1);
    assert_eq!(report.questions_inserted, 1);

    let python = repo.list_quizzes().await.unwrap()[0].id();
    let questions = repo.questions_for_quiz(python).await.unwrap();
    assert_eq!(questions.len(), 4);
    assert_eq!(questions[3].options(), ["for", "loop", "each"]);
}

#[tokio::test]
async fn question_options_round_trip_in_stored_order() {
    let repo = fresh("memdb_options_order").await;
    repo.seed_catalog(&CatalogSeed::builtin().validate().unwrap())
        .await
        .unwrap();

    let python = repo.list_quizzes().await.unwrap()[0].id();
    let questions = repo.questions_for_quiz(python).await.unwrap();
    assert_eq!(
        questions[0].options(),
        ["int x = 10", "x = 10", "variable x = 10 ", "declare x = 10"]
    );
    assert_eq!(questions[1].answer(), "List");
    assert!(questions.windows(2).all(|w| w[0].id() < w[1].id()));
}

#[tokio::test]
async fn unknown_quiz_has_no_questions() {
    let repo = fresh("memdb_unknown_quiz").await;
    assert!(repo.list_quizzes().await.unwrap().is_empty());
    assert!(
        repo.questions_for_quiz(QuizId::new(42))
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn usernames_are_unique_after_normalization() {
    let repo = fresh("memdb_unique_users").await;
    let id = repo
        .insert_user(&Credentials::normalize("Carol", "pw"))
        .await
        .unwrap();
    let err = repo
        .insert_user(&Credentials::normalize("  CAROL", "pw2"))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Conflict));
    assert_eq!(repo.count_users().await.unwrap(), 1);

    let found = repo
        .find_by_credentials(&Credentials::normalize("carol ", " pw"))
        .await
        .unwrap()
        .expect("user");
    assert_eq!(found.id(), id);
    assert_eq!(found.username().as_str(), "carol");
    assert!(
        repo.find_by_credentials(&Credentials::normalize("carol", "PW"))
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn scores_are_appended_and_joined_with_quiz_names() {
    let repo = fresh("memdb_scores").await;
    repo.seed_catalog(&CatalogSeed::builtin().validate().unwrap())
        .await
        .unwrap();
    let user = repo
        .insert_user(&Credentials::normalize("dave", "pw"))
        .await
        .unwrap();
    let quizzes = repo.list_quizzes().await.unwrap();

    for (quiz, correct) in [(&quizzes[1], 2_u32), (&quizzes[1], 3), (&quizzes[0], 0)] {
        repo.append_score(&NewScoreRecord {
            user_id: user,
            quiz_id: quiz.id(),
            score: Score::new(correct, 3).unwrap(),
            recorded_at: fixed_now(),
        })
        .await
        .unwrap();
    }

    let rows = repo.results_for_user(user).await.unwrap();
    let summary: Vec<_> = rows
        .iter()
        .map(|r| (r.quiz_name.as_str(), r.score.correct()))
        .collect();
    assert_eq!(summary, [("DBMS", 2_u32), ("DBMS", 3), ("Python", 0)]);
    assert_eq!(rows[0].recorded_at, fixed_now());
    assert!(rows.iter().all(|r| r.score.total() == 3));
    assert!(rows.windows(2).all(|w| w[0].id < w[1].id));
}

#[tokio::test]
async fn score_for_missing_user_violates_foreign_key() {
    let repo = fresh("memdb_score_fk").await;
    repo.seed_catalog(&CatalogSeed::builtin().validate().unwrap())
        .await
        .unwrap();
    let quiz = repo.list_quizzes().await.unwrap()[0].id();

    let err = repo
        .append_score(&NewScoreRecord {
            user_id: UserId::new(77),
            quiz_id: quiz,
            score: Score::new(1, 3).unwrap(),
            recorded_at: fixed_now(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound));
    assert!(
        repo.results_for_user(UserId::new(77))
            .await
            .unwrap()
            .is_empty()
    );
}
