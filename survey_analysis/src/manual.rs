/*!

This is the long-form manual for `survey_analysis` and `surveyrpt`.

## Input

A survey is a list of responses. Each response is a flat record of columns:
* `Department`: the department of the respondent. Responses without a department
are grouped together under `Ungrouped`.
* `Question <n>` and `Answer <n>`: the text of question `n` and the answer of the
respondent. The numbers do not need to be contiguous.

Blank answers and the label `No answer` count as skipped questions. Both column and
label names can be changed through `AnalysisRules`.

## Question types

Each question gets a type, looking at its answers in input order. The first
non-blank answer decides, following these rules in order:
1. `1` to `5`, or `<n> stars`: a star rating (`StarRating`)
2. an answer with a comma: a multi-select question (`Checkbox`)
3. one of the known labels (`Very Satisfied`, `Agree`, `Sometimes`, `Yes`,
`Excellent`, ...): a single-select question (`MCQ`)

If none applies, the question is `MCQ` if more than half of its answers are known
labels, and free text (`Text`) otherwise.

Since the first answer decides, reordering the input may change the type of a question.

## Options

* star ratings: always `1` to `5`. Only these exact values are counted.
* single and multi-select questions: all the distinct answers, sorted. Multi-select
answers are split on commas.
* free text: no options, the answers are counted as they are written.

## Satisfaction

Two independent rates are computed, for the whole survey and for each department:
* the satisfaction rate: the average score of the satisfied answers (`Very Satisfied`: 100,
`Satisfied`: 75, `<n> stars` with `n` of 3 or more: `n/5`)
* the dissatisfaction rate: the average score of the dissatisfied answers
(`Very Dissatisfied`: 100, `Dissatisfied`: 75, `<n> stars` with `n` below 3: `(5-n)/5`)

They do not add up to 100. The department with the highest dissatisfaction rate is
reported in the overview; in case of a tie, the department that appears first in the
input is reported.

## Output

`surveyrpt` writes the analysis in JSON:

```text
{
  "overview": {
    "numberOfDepartments": 2,
    "averageSatisfaction": "88%",
    "averageDissatisfaction": "75%",
    "departmentWithHighestDissatisfaction": "Support",
    "highestDissatisfactionRate": 75,
    "totalQuestions": 1,
    "totalResponses": 3
  },
  "departmentStats": {
    "Sales": {
      "questionAnalysis": {
        "1": {
          "question": "How satisfied are you?",
          "type": "MCQ",
          "responses": { "Dissatisfied": 0, "Satisfied": 1, "Very Satisfied": 1 },
          "responseCount": 2,
          "allOptions": ["Dissatisfied", "Satisfied", "Very Satisfied"]
        }
      },
      "responseCount": 2
    },
    ...
  },
  "questionAnalysis": {
    "1": {
      "question": "How satisfied are you?",
      "type": "MCQ",
      "departmentResponses": { "Sales": { ... }, "Support": { ... } },
      "totalResponses": 3,
      "allOptions": ["Dissatisfied", "Satisfied", "Very Satisfied"]
    }
  }
}
```

*/
