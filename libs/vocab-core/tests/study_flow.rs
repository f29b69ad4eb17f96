//! End-to-end flows through the repository and study engine.

use pretty_assertions::assert_eq;
use std::rc::Rc;
use vocab_core::{
    parse, AggregateStats, MemoryStorage, StudyEngine, StudyMode, WordPair, WordRepository,
};

type Repo = WordRepository<Rc<MemoryStorage>>;
type Engine = StudyEngine<Rc<MemoryStorage>>;

fn open(storage: &Rc<MemoryStorage>) -> (Repo, Engine) {
    let repo = WordRepository::load(Rc::clone(storage)).unwrap();
    let engine = StudyEngine::load(Rc::clone(storage)).unwrap();
    (repo, engine)
}

fn answer(repo: &mut Repo, english: &str, correct: bool, times: usize) {
    let id = repo.find_by_english(english).unwrap().id.clone();
    for _ in 0..times {
        repo.update_stats(&id, correct).unwrap();
    }
}

#[test]
fn import_answer_and_classify() {
    let storage = Rc::new(MemoryStorage::new());
    let (mut repo, engine) = open(&storage);

    repo.add_words(&[WordPair::new("hello", "привет"), WordPair::new("bye", "пока")])
        .unwrap();
    let stats = engine.aggregate_stats(&repo);
    assert_eq!(stats.total_words, 2);
    assert_eq!(stats.mastered_words, 0);

    answer(&mut repo, "hello", true, 3);
    assert_eq!(engine.aggregate_stats(&repo).mastered_words, 1);

    answer(&mut repo, "bye", false, 2);
    assert_eq!(
        engine.aggregate_stats(&repo),
        AggregateStats {
            total_words: 2,
            mastered_words: 1,
            learning_words: 0,
            difficult_words: 1,
            recent_performance: vec![],
        }
    );
}

#[test]
fn full_quiz_session_updates_words_and_history() {
    let storage = Rc::new(MemoryStorage::new());
    let (mut repo, mut engine) = open(&storage);
    let pairs = parse("hello,привет\nbye,пока\ncat,кот").unwrap();
    repo.add_words(&pairs).unwrap();

    let mut session = engine.start_session(&repo, StudyMode::Quiz);
    assert_eq!(session.len(), 3);
    while let Some(word) = session.current() {
        let correct = word.english != "cat";
        if let Some(id) = session.answer(correct) {
            repo.update_stats(&id, correct).unwrap();
        }
    }

    let recorded = engine.complete_session(&session).unwrap().unwrap();
    assert!((recorded - 200.0 / 3.0).abs() < 1e-9);
    assert_eq!(repo.find_by_english("cat").unwrap().incorrect_count, 1);
    assert!(repo.list().iter().all(|w| w.last_studied.is_some()));

    // state survives a restart
    let (repo, engine) = open(&storage);
    assert_eq!(repo.len(), 3);
    assert_eq!(engine.recent_performance().len(), 1);
    assert_eq!(repo.find_by_english("hello").unwrap().correct_count, 1);
}

#[test]
fn learn_shuffle_is_roughly_uniform() {
    let storage = Rc::new(MemoryStorage::new());
    let (mut repo, engine) = open(&storage);
    repo.add_words(&[
        WordPair::new("a", "1"),
        WordPair::new("b", "2"),
        WordPair::new("c", "3"),
    ])
    .unwrap();

    let runs = 1000;
    let mut counts = [[0usize; 3]; 3];
    for _ in 0..runs {
        let words = engine.study_words(&repo, StudyMode::Learn);
        for (position, word) in words.iter().enumerate() {
            let index = ["a", "b", "c"].iter().position(|e| *e == word.english).unwrap();
            counts[index][position] += 1;
        }
    }

    // expected 333 per cell, standard deviation about 15
    for row in counts {
        for count in row {
            assert!((250..=420).contains(&count), "skewed counts: {counts:?}");
        }
    }
}

#[test]
fn reset_everything_clears_words_and_history() {
    let storage = Rc::new(MemoryStorage::new());
    let (mut repo, mut engine) = open(&storage);
    repo.add_words(&[WordPair::new("hello", "привет")]).unwrap();
    engine.record_study_session(100.0).unwrap();

    repo.clear().unwrap();
    engine.reset_all().unwrap();

    let (repo, engine) = open(&storage);
    assert_eq!(engine.aggregate_stats(&repo), AggregateStats::default());
}
