//! Demo dataset
//!
//! The portal ships with a small sample catalogue so the public pages and
//! the back-office have something to show before any real content exists.

use chrono::NaiveDate;

use crate::core::models::{
    ArticleStatus, Course, CourseLevel, CourseStatus, Event, EventStatus, NewsArticle, Project,
    ProjectPriority, ProjectStatus,
};
use crate::core::store::Store;

/// Fill the store's collections with the demo dataset
pub fn populate(store: &Store) {
    for course in sample_courses() {
        store.courses.create(course);
    }
    for event in sample_events() {
        store.events.create(event);
    }
    for article in sample_news() {
        store.news.create(article);
    }
    for project in sample_projects() {
        store.projects.create(project);
    }

    store.settings.update(|s| {
        s.school_name = "ESST".to_string();
        s.tagline = "École Supérieure des Sciences et Technologies".to_string();
        s.contact_email = "contact@esst.example".to_string();
    });
}

fn sample_courses() -> Vec<Course> {
    let mut algo = Course::new(
        "course-algo-1".to_string(),
        "Algorithmique et structures de données".to_string(),
        "Dr. Fatou Sow".to_string(),
        40,
    );
    algo.category = "Informatique".to_string();
    algo.level = CourseLevel::Beginner;
    algo.enrolled = 35;
    algo.rating = 4.6;
    algo.status = CourseStatus::Active;
    algo.description = "Bases de l'algorithmique, complexité, structures classiques.".to_string();

    let mut reseaux = Course::new(
        "course-reseaux-2".to_string(),
        "Réseaux et protocoles".to_string(),
        "M. Ibrahima Diallo".to_string(),
        30,
    );
    reseaux.category = "Informatique".to_string();
    reseaux.level = CourseLevel::Intermediate;
    reseaux.enrolled = 30;
    reseaux.rating = 4.2;
    reseaux.status = CourseStatus::Active;

    let mut ia = Course::new(
        "course-ia-3".to_string(),
        "Introduction à l'intelligence artificielle".to_string(),
        "Dr. Aminata Ba".to_string(),
        25,
    );
    ia.category = "Informatique".to_string();
    ia.level = CourseLevel::Advanced;
    ia.status = CourseStatus::Draft;

    vec![algo, reseaux, ia]
}

fn sample_events() -> Vec<Event> {
    let mut portes = Event::new(
        "event-po-1".to_string(),
        "Journée portes ouvertes".to_string(),
        NaiveDate::from_ymd_opt(2025, 9, 20).expect("valid date"),
        "Campus principal".to_string(),
    );
    portes.time = "09:00".to_string();
    portes.category = "Découverte".to_string();
    portes.expected_attendees = 300;
    portes.registered_attendees = 120;
    portes.organizer = "Service communication".to_string();

    let mut hackathon = Event::new(
        "event-hk-2".to_string(),
        "Hackathon ESST".to_string(),
        NaiveDate::from_ymd_opt(2025, 11, 8).expect("valid date"),
        "Bâtiment B, salle 204".to_string(),
    );
    hackathon.time = "18:30".to_string();
    hackathon.category = "Compétition".to_string();
    hackathon.expected_attendees = 80;
    hackathon.registered_attendees = 64;
    hackathon.organizer = "Club informatique".to_string();
    hackathon.status = EventStatus::Upcoming;

    vec![portes, hackathon]
}

fn sample_news() -> Vec<NewsArticle> {
    let mut rentree = NewsArticle::new(
        "news-rentree-1".to_string(),
        "Rentrée 2025 : ce qui change".to_string(),
        "Service communication".to_string(),
    );
    rentree.excerpt = "Nouveaux parcours, nouveaux locaux.".to_string();
    rentree.content = "La rentrée 2025 apporte deux nouveaux parcours...".to_string();
    rentree.add_tag("rentrée".to_string());
    rentree.add_tag("campus".to_string());
    rentree.status = ArticleStatus::Published;

    let mut partenariat = NewsArticle::new(
        "news-part-2".to_string(),
        "Nouveau partenariat industriel".to_string(),
        "Direction".to_string(),
    );
    partenariat.excerpt = "Un accord cadre signé pour les stages.".to_string();
    partenariat.status = ArticleStatus::Draft;

    vec![rentree, partenariat]
}

fn sample_projects() -> Vec<Project> {
    let mut robot = Project::new(
        "project-robot-1".to_string(),
        "Robot suiveur de ligne".to_string(),
    );
    robot.category = "Robotique".to_string();
    robot.status = ProjectStatus::Active;
    robot.priority = ProjectPriority::High;
    robot.progress = 65;
    robot.add_member("Awa Ndiaye".to_string());
    robot.add_member("Mamadou Fall".to_string());

    let mut portail = Project::new(
        "project-portail-2".to_string(),
        "Refonte du portail étudiant".to_string(),
    );
    portail.category = "Web".to_string();
    portail.status = ProjectStatus::Planning;
    portail.progress = 10;
    portail.add_member("Cheikh Sarr".to_string());

    vec![robot, portail]
}
