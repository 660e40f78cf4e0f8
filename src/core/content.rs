//! Static page content – profile, sections, and the project list.
//!
//! Everything here is read-only.  [`validate`] checks the preconditions the
//! card transition relies on (every project has an id and a title, and ids
//! are unique) so bad data is rejected at startup instead of mid-animation.

use std::collections::HashSet;

use thiserror::Error;

// ───────────────────────────────────────── records ───────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: &'static str,
    pub title: &'static str,
    /// One-liner shown on the card.
    pub short: &'static str,
    /// Long description shown in the modal.
    pub description: &'static str,
    pub tags: &'static [&'static str],
    pub href: Option<&'static str>,
}

/// A plain information card (education, experience, skills).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoCard {
    pub title: &'static str,
    pub meta: Option<&'static str>,
    pub body: Option<&'static str>,
    pub bullets: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionBody {
    Hero,
    Cards(&'static [InfoCard]),
    Projects,
    Contact,
}

/// One page section: a marquee divider followed by its body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSection {
    /// Divider label.
    pub label: &'static str,
    /// Navigation anchor.
    pub anchor: &'static str,
    pub body: SectionBody,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactLink {
    pub label: &'static str,
    pub text: &'static str,
    pub href: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Profile {
    pub first_name: &'static str,
    pub last_name: &'static str,
    pub tagline: &'static str,
    pub contact_heading: &'static str,
    pub contacts: &'static [ContactLink],
}

impl Profile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

// ───────────────────────────────────────── validation ────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    #[error("project #{index} has an empty id")]
    MissingId { index: usize },
    #[error("project `{id}` has an empty title")]
    MissingTitle { id: &'static str },
    #[error("project id `{id}` is used more than once")]
    DuplicateId { id: &'static str },
}

pub fn validate(projects: &[Project]) -> Result<(), ContentError> {
    let mut seen = HashSet::new();
    for (index, project) in projects.iter().enumerate() {
        if project.id.trim().is_empty() {
            return Err(ContentError::MissingId { index });
        }
        if project.title.trim().is_empty() {
            return Err(ContentError::MissingTitle { id: project.id });
        }
        if !seen.insert(project.id) {
            return Err(ContentError::DuplicateId { id: project.id });
        }
    }
    Ok(())
}

// ───────────────────────────────────────── data ──────────────

pub static PROFILE: Profile = Profile {
    first_name: "Utsav",
    last_name: "Patel",
    tagline: "I build ML systems, NLP pipelines and playful, animated experiences. \
              Scroll to see more!",
    contact_heading: "Hit me up, I don't bite",
    contacts: &[
        ContactLink {
            label: "Email",
            text: "patelutsav257@gmail.com",
            href: "mailto:patelutsav257@gmail.com",
        },
        ContactLink {
            label: "GitHub",
            text: "github.com/utsavp257",
            href: "https://github.com/utsavp257",
        },
        ContactLink {
            label: "Instagram",
            text: "@_utsxv.bt",
            href: "https://www.instagram.com/_utsxv.bt/",
        },
    ],
};

static EDUCATION: &[InfoCard] = &[
    InfoCard {
        title: "Bachelor of Technology, Computer Science - IIT Palakkad",
        meta: Some("Jul 2021 – May 2025 • CGPA: 8.77"),
        body: Some(
            "Relevant coursework: Data Structures and Algorithms, Artificial Intelligence, \
             Design and Analysis of Algorithms, Natural Language Processing, Cryptography, \
             Big Data Lab, Computational Methods and Applications",
        ),
        bullets: &[],
    },
    InfoCard {
        title: "Master of Science, Data Science - Fordham University",
        meta: Some("Aug 2025 – May 2027 • GPA: 4"),
        body: Some("Relevant coursework: Data Mining"),
        bullets: &[],
    },
];

static EXPERIENCE: &[InfoCard] = &[
    InfoCard {
        title: "Software Developer Intern — E-Ring IT Solutions",
        meta: Some("Jun 2024 – Aug 2024"),
        body: None,
        bullets: &[
            "Converted ActiveX/legacy UI into Classic ASP pages with Excel-like interface.",
            "Built a JS library to simulate spreadsheet components, collaborated with QA, \
             and improved front-end performance.",
        ],
    },
    InfoCard {
        title: "Software Developer Intern — Stealth Startup",
        meta: Some("Jan 2025 – Mar 2025"),
        body: None,
        bullets: &[
            "Helped build a part of the web app in Next.js that streamlines various \
             conversation platforms with AI",
        ],
    },
    InfoCard {
        title: "Other Roles",
        meta: None,
        body: None,
        bullets: &[
            "Volunteered at Google Developer Group (GDG) NYC DevFest and Peace By Design: \
             AI and Tech event.",
            "Led a crew of cameramen for my college fest and its various events, as well as \
             making promo movies with a team of editors",
        ],
    },
];

static SKILLS: &[InfoCard] = &[
    InfoCard {
        title: "Languages",
        meta: None,
        body: Some("C++, Python, C, JavaScript, TypeScript, C#, SQL, Java"),
        bullets: &[],
    },
    InfoCard {
        title: "Frameworks & Tools",
        meta: None,
        body: Some(
            "Next.js, Express.js, React, Node, Tailwind, PyTorch, TensorFlow, MongoDB, Docker",
        ),
        bullets: &[],
    },
    InfoCard {
        title: "Things I'm good at",
        meta: None,
        body: Some(
            "NLP, Fine-grained NER, Machine Learning, LLMs, DSA, Algorithms, GitHub, \
             Database Management, Full Stack Development",
        ),
        bullets: &[],
    },
];

/// Page sections in display order.
pub static SECTIONS: &[PageSection] = &[
    PageSection {
        label: "About Me",
        anchor: "about",
        body: SectionBody::Hero,
    },
    PageSection {
        label: "Education",
        anchor: "education",
        body: SectionBody::Cards(EDUCATION),
    },
    PageSection {
        label: "Experience",
        anchor: "experience",
        body: SectionBody::Cards(EXPERIENCE),
    },
    PageSection {
        label: "Skills",
        anchor: "skills",
        body: SectionBody::Cards(SKILLS),
    },
    PageSection {
        label: "Projects",
        anchor: "projects",
        body: SectionBody::Projects,
    },
    PageSection {
        label: "Contact Me",
        anchor: "contact",
        body: SectionBody::Contact,
    },
];

pub static PROJECTS: &[Project] = &[
    Project {
        id: "ner-low-resource",
        title: "NER in Low-Resource Languages",
        short: "Cross-lingual projection + IndicBERT fine-tuning for NER datasets.",
        description: "Built an end-to-end pipeline to generate silver-standard NER datasets by \
                      projecting English NER tags onto Indic languages using Samanantar and \
                      Wikipedia data. Used tools like spaCy, LaBSE, SimAlign, and Awesome-Align \
                      for alignment, and fine-tuned IndicBERT for NER. Focused on alignment \
                      quality, filtering, and reproducible training.",
        tags: &["NLP", "NER", "IndicBERT", "Tag Projection"],
        href: Some("https://github.com/utsavp257/NER_tagging_pipeline"),
    },
    Project {
        id: "gallery-app",
        title: "Gallery App",
        short: "Next.js app with authentication and image uploads.",
        description: "Developed a feature-rich gallery app using TypeScript, JavaScript, and \
                      Tailwind CSS, where users can upload and view images after logging in \
                      (using parallel routes). Implemented authentication with Clerk, deployed \
                      on Vercel, and integrated Sentry for error management, PostHog for \
                      analytics, and Upstash for rate limiting.",
        tags: &["Next.js", "TypeScript", "Clerk", "Vercel"],
        href: Some("https://github.com/utsavp257/t3gallery"),
    },
    Project {
        id: "conv-sum",
        title: "Conversation Summarizer",
        short: "Dialogue summarization fine-tuned with QLoRA on Llama2.",
        description: "Summarizer trained on SAMSum and fine-tuned with QLoRA for resource \
                      efficiency; outputs concise conversation summaries.",
        tags: &["LLMs", "Llama2", "QLoRA"],
        href: Some("https://github.com/utsavp257/conversation-summarizer"),
    },
    Project {
        id: "qa-systems-comparative",
        title: "Question-Answering (QA) systems for comparative questions",
        short: "Studying input variations and training effects on BERT performance.",
        description: "Studied the effect of feeding inputs of varying quantitative content to \
                      language models like BERT, and tested training patterns to measure the \
                      variation in performance.",
        tags: &["LLMs", "BERT", "Comparative QA"],
        href: Some("https://github.com/utsavp257/BERT_NLP_ComparativeQue"),
    },
    Project {
        id: "user-authentication-system",
        title: "User Authentication System",
        short: "Secure authentication with signup, login, recovery, and admin controls.",
        description: "Designed and implemented a user authentication system featuring signup, \
                      login, password recovery, email verification, and admin controls using \
                      MongoDB, ExpressJS, React and NodeJS, with encrypted password storage, \
                      token-based email verification, and admin oversight for user accounts.",
        tags: &["Authentication", "MERN Stack", "Security", "User Management", "Encryption"],
        href: Some("https://github.com/utsavp257/User_Auth"),
    },
    Project {
        id: "hospital-management-system",
        title: "Hospital Management System",
        short: "Database-driven hospital system built with Django and PostgreSQL.",
        description: "Designed a database and deployed the system using existing frameworks: \
                      Django and JavaScript, with a locally hosted PostgreSQL server managing \
                      the backend database.",
        tags: &["Django", "PostgreSQL", "Database", "Hospital Management", "JavaScript"],
        href: Some("https://github.com/utsavp257/Hospital-Management-System"),
    },
];
