//! Static portfolio content rendered on the home page.

#[derive(Debug, Clone, Copy)]
pub struct Project {
    pub title: &'static str,
    pub description: &'static str,
    pub image: &'static str,
    pub technologies: &'static [&'static str],
    pub live_url: &'static str,
    pub repository_url: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct SkillGroup {
    pub title: &'static str,
    pub skills: &'static [&'static str],
}

#[derive(Debug, Clone, Copy)]
pub struct SocialLink {
    pub label: &'static str,
    pub url: &'static str,
}

pub const HEADLINE: &str = "Full Stack Enthusiast";
pub const TAGLINE: &str =
    "I create beautiful and functional web applications using modern technologies.";
pub const CV_PATH: &str = "/My-CV.pdf";

pub static ABOUT: [&str; 2] = [
    "I'm a passionate full-stack developer with experience in creating web applications using modern technologies. I love solving problems and turning ideas into reality through code.",
    "When I'm not coding, you can find me exploring new technologies, reading tech blogs, or working on personal projects that challenge my skills and creativity.",
];

pub static SKILLS: [SkillGroup; 3] = [
    SkillGroup {
        title: "Frontend",
        skills: &["React", "Next.js", "TypeScript", "Tailwind CSS"],
    },
    SkillGroup {
        title: "Backend",
        skills: &["Python", "PHP"],
    },
    SkillGroup {
        title: "Database & Tools",
        skills: &["MongoDB", "PostgreSQL", "Git"],
    },
];

pub static LEARNING: [&str; 3] = ["Machine Learning", "React Native", "PostgreSQL"];

pub static PROJECTS: [Project; 2] = [
    Project {
        title: "E-Commerce Website",
        description: "A full-stack e-commerce platform built with PHP, featuring product catalog, shopping cart, and payment integration.",
        image: "/images/projects/e-commerce-website.jpg",
        technologies: &["PHP", "Blade", "Javascript", "HTML", "CSS"],
        live_url: "http://miratara.site/",
        repository_url: "https://github.com/Andika12505/Miratara",
    },
    Project {
        title: "Stock Management App",
        description: "A simple collaborative stock management application.",
        image: "/images/projects/task-manager-preview.png",
        technologies: &["Python", "MongoDB"],
        live_url: "https://taskmanager-demo.netlify.app",
        repository_url: "https://github.com/PutuAditya-11/CollegeRep",
    },
];

pub static SOCIAL_LINKS: [SocialLink; 2] = [
    SocialLink {
        label: "LinkedIn",
        url: "https://www.linkedin.com/in/putu-aditya-dharma-widhidarsana-bb466528a/",
    },
    SocialLink {
        label: "GitHub",
        url: "https://github.com/PutuAditya-11",
    },
];

pub fn projects() -> &'static [Project] {
    &PROJECTS
}

pub fn skills() -> &'static [SkillGroup] {
    &SKILLS
}
