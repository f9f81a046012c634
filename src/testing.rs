// testing.rs - 单元测试共用的种子数据

use crate::schema::{Mode, NewDocument, Subject};
use crate::slug::slugify;
use crate::store::{DocumentStore, MemoryStore};

pub(crate) fn new_document(
    mode: Mode,
    subject: Subject,
    title: &str,
    description: &str,
) -> NewDocument {
    NewDocument {
        mode,
        subject,
        title: title.to_string(),
        filename: slugify(title),
        link: format!("https://drive.example.com/{}.pdf", slugify(title)),
        description: description.to_string(),
        photo: String::new(),
    }
}

/// 覆盖两个模式、多个科目的种子库
pub(crate) fn seeded_store() -> MemoryStore {
    let store = MemoryStore::new();
    let seeds = [
        (Mode::Academic, Subject::Physics1, "Vectors", "Vector algebra refresher"),
        (Mode::Academic, Subject::Physics1, "Newtonian Mechanics", ""),
        (Mode::Academic, Subject::Physics2, "Thermodynamics", "Heat engines"),
        (Mode::Academic, Subject::Ict, "Networking Basics", "OSI model walkthrough"),
        (Mode::Admission, Subject::Ict, "Networking Basics", "Admission edition"),
        (
            Mode::Admission,
            Subject::Chemistry1,
            "Organic Chemistry",
            "Touches on the PHYSICS of bonding",
        ),
        (Mode::Academic, Subject::Math1, "Physics-free Calculus", "Limits and derivatives"),
        (Mode::Admission, Subject::Biology2, "Genetics", "Mendel and beyond"),
    ];
    for (mode, subject, title, description) in seeds {
        store
            .insert_one(new_document(mode, subject, title, description))
            .expect("seed insert");
    }
    store
}
