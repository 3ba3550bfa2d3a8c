// Resume parsing LLM prompt template.
// The literal JSON shape below is the contract `decode_portfolio` reads back.

pub const RESUME_PARSE_PROMPT: &str = r#"You are a professional resume parser. Extract structured information from the following resume and return it as valid JSON.

Resume Text:
{resume_text}

IMPORTANT: Return ONLY valid JSON (no markdown, no code blocks, no explanations). The JSON must follow this exact structure:

{
  "personal": {
    "name": "Full Name",
    "title": "Job Title or Professional Role",
    "email": "email@example.com",
    "phone": "+1 (555) 123-4567",
    "location": "City, State or Country",
    "linkedin": "linkedin.com/in/username",
    "github": "github.com/username",
    "website": "personal-website.com"
  },
  "about": "A compelling 2-3 sentence professional summary",
  "skills": ["Skill 1", "Skill 2", "Skill 3"],
  "experience": [
    {
      "title": "Job Title",
      "company": "Company Name",
      "location": "City, State",
      "period": "Start Date - End Date (e.g., Jan 2023 - Present)",
      "points": ["Key achievement or responsibility 1", "Achievement 2"]
    }
  ],
  "projects": [
    {
      "name": "Project Name",
      "description": "Brief description of the project",
      "tech": ["Technology 1", "Technology 2"],
      "emoji": "🚀"
    }
  ],
  "education": [
    {
      "degree": "Degree Name (e.g., Bachelor of Science in Computer Science)",
      "school": "University Name",
      "location": "City, State",
      "year": "Graduation Year (e.g., 2020)",
      "gpa": "3.8"
    }
  ]
}

EXTRACTION RULES:
1. Extract ALL information available in the resume
2. For missing fields, use empty string "" for text or empty array [] for lists
3. For projects, suggest appropriate emojis based on project type (e.g., 🚀 for web apps, 📱 for mobile, 🤖 for AI/ML, 🎨 for design, 💼 for business, 📊 for data, 🔧 for tools)
4. Preserve bullet points and achievements from work experience
5. Extract all skills mentioned (technical, soft skills, tools, languages)
6. Format dates consistently (e.g., "Jan 2023 - Present" or "2020 - 2022")
7. If no about/bio is present, generate one from the experience
8. Ensure ALL JSON is properly formatted and valid
9. Return ONLY the JSON object, nothing else

Begin parsing:"#;

pub fn build_parsing_prompt(resume_text: &str) -> String {
    RESUME_PARSE_PROMPT.replace("{resume_text}", resume_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_resume_and_schema() {
        let prompt = build_parsing_prompt("Jane Doe\nStaff Engineer");
        assert!(prompt.contains("Resume Text:\nJane Doe\nStaff Engineer\n"));
        assert!(!prompt.contains("{resume_text}"));
        for key in [
            "\"personal\"",
            "\"about\"",
            "\"skills\"",
            "\"experience\"",
            "\"projects\"",
            "\"education\"",
        ] {
            assert!(prompt.contains(key), "schema is missing {key}");
        }
        assert!(prompt.contains("Return ONLY the JSON object"));
    }
}
